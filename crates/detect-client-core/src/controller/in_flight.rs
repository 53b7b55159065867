use detect_shared::{
    internal_error,
    prediction::PredictionResponse,
    uac::{TokenInfo, UserListRow, UserProfile},
};
use futures::channel::oneshot;

use super::generation::{Generation, RequestKind};
use crate::{client::ClientResult, ClientError};

type Rx<T> = oneshot::Receiver<ClientResult<T>>;

/// A request that has been sent and not yet handled
#[derive(Debug)]
pub(super) struct InFlight {
    pub generation: Generation,
    /// Session epoch at the time the request was issued
    pub epoch: Generation,
    pub response: PendingResponse,
}

#[derive(Debug)]
pub(super) enum PendingResponse {
    Login(Rx<TokenInfo>),
    Register(Rx<()>),
    CurrentUser(Rx<UserProfile>),
    UpdateUser(Rx<()>),
    Users(Rx<Vec<UserListRow>>),
    Predict(Rx<PredictionResponse>),
}

#[derive(Debug)]
pub(super) enum Completed {
    Login(ClientResult<TokenInfo>),
    Register(ClientResult<()>),
    CurrentUser(ClientResult<UserProfile>),
    UpdateUser(ClientResult<()>),
    Users(ClientResult<Vec<UserListRow>>),
    Predict(ClientResult<PredictionResponse>),
}

macro_rules! try_complete {
    ($rx: expr, $variant: ident) => {
        match $rx.try_recv() {
            Ok(Some(outcome)) => Some(Completed::$variant(outcome)),
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                internal_error!(concat!(
                    "response sender dropped for ",
                    stringify!($variant)
                ));
                Some(Completed::$variant(Err(ClientError::Canceled)))
            }
        }
    };
}

impl PendingResponse {
    pub fn kind(&self) -> RequestKind {
        match self {
            PendingResponse::Login(_) => RequestKind::Login,
            PendingResponse::Register(_) => RequestKind::Register,
            PendingResponse::CurrentUser(_) => RequestKind::CurrentUser,
            PendingResponse::UpdateUser(_) => RequestKind::UpdateUser,
            PendingResponse::Users(_) => RequestKind::Users,
            PendingResponse::Predict(_) => RequestKind::Predict,
        }
    }

    /// Returns the outcome if it has arrived
    pub fn try_complete(&mut self) -> Option<Completed> {
        match self {
            PendingResponse::Login(rx) => try_complete!(rx, Login),
            PendingResponse::Register(rx) => try_complete!(rx, Register),
            PendingResponse::CurrentUser(rx) => try_complete!(rx, CurrentUser),
            PendingResponse::UpdateUser(rx) => try_complete!(rx, UpdateUser),
            PendingResponse::Users(rx) => try_complete!(rx, Users),
            PendingResponse::Predict(rx) => try_complete!(rx, Predict),
        }
    }
}

impl Completed {
    pub fn kind(&self) -> RequestKind {
        match self {
            Completed::Login(_) => RequestKind::Login,
            Completed::Register(_) => RequestKind::Register,
            Completed::CurrentUser(_) => RequestKind::CurrentUser,
            Completed::UpdateUser(_) => RequestKind::UpdateUser,
            Completed::Users(_) => RequestKind::Users,
            Completed::Predict(_) => RequestKind::Predict,
        }
    }
}
