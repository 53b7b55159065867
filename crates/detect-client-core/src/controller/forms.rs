use detect_shared::req_args::{ImageUpload, LoginReqArgs, RegisterReqArgs, UpdateUserReqArgs};
use secrecy::SecretString;

/// Input fields of every page. Owned by the controller so handlers read from
/// and reset the same state the UI edits
#[derive(Debug, Default)]
pub struct Forms {
    pub login: LoginForm,
    pub register: RegisterForm,
    pub profile: ProfileForm,
    pub predict: PredictForm,
}

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Debug, Default)]
pub struct ProfileForm {
    pub new_email: String,
    pub new_name: String,
}

#[derive(Debug, Default)]
pub struct PredictForm {
    pub selected: Option<ImageUpload>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: Default::default(),
            password: SecretString::from(""),
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: Default::default(),
            email: Default::default(),
            password: SecretString::from(""),
            confirm_password: SecretString::from(""),
        }
    }
}

impl LoginForm {
    pub fn to_req_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(self.email.trim(), self.password.clone())
    }
}

impl RegisterForm {
    pub fn to_req_args(&self) -> RegisterReqArgs {
        RegisterReqArgs {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

impl ProfileForm {
    pub fn to_req_args(&self) -> UpdateUserReqArgs {
        UpdateUserReqArgs::from_form_fields(&self.new_email, &self.new_name)
    }
}
