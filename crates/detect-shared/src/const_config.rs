//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Key the bearer token is persisted under (browser local storage or the
    /// equivalent file on native)
    pub const CLIENT_AUTH_TOKEN_STORAGE_KEY: &str = "authToken";

    /// Address of the backend when it is run locally for development
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8000";

    /// How long a notification stays on screen if not dismissed
    pub const CLIENT_NOTIFICATION_TIMEOUT_SECS: u64 = 6;

    /// Used to build a `data:` URI from the processed image returned by the
    /// backend
    pub const CLIENT_PROCESSED_IMAGE_MIME: &str = "image/jpeg";
}

/// User facing text. The backend and its users are Russian speaking so the
/// messages match that
pub mod msg {
    pub const MSG_LOGIN_REQUIRED: &str = "Пожалуйста, войдите в систему";
    pub const MSG_NO_IMAGE_SELECTED: &str = "Пожалуйста, выберите изображение";
    pub const MSG_INSUFFICIENT_RIGHTS: &str = "У вас недостаточно прав";

    pub const MSG_LOGIN_FAILED: &str = "Ошибка авторизации";
    pub const MSG_REGISTER_FAILED: &str = "Ошибка регистрации";
    pub const MSG_REGISTER_SUCCESS: &str = "Регистрация прошла успешно! Теперь вы можете войти.";
    pub const MSG_PROFILE_LOAD_FAILED: &str = "Ошибка при загрузке профиля";
    pub const MSG_PROFILE_UPDATE_FAILED: &str = "Ошибка при обновлении профиля";
    pub const MSG_PROFILE_UPDATED: &str = "Профиль успешно обновлен";
    pub const MSG_USERS_LOAD_FAILED: &str = "Ошибка при загрузке пользователей";
    pub const MSG_PREDICT_FAILED: &str = "Ошибка при получении предсказания";
    pub const MSG_SESSION_EXPIRED: &str = "Сессия истекла, войдите снова";

    pub const MSG_STATUS_ACTIVE: &str = "Активен";
    pub const MSG_STATUS_INACTIVE: &str = "Неактивен";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_ADMIN_USERS: PathSpec = PathSpec::get("/admin/users/");
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/login/");
    pub const PATH_AUTH_REGISTER: PathSpec = PathSpec::post("/auth/register/");
    pub const PATH_AUTH_USER_ME: PathSpec = PathSpec::get("/auth/user/me/");
    pub const PATH_AUTH_USER_ME_UPDATE: PathSpec = PathSpec::put("/auth/user/me/update_user/");
    pub const PATH_PREDICTIONS_PREDICT: PathSpec = PathSpec::post("/predictions/predict/");
}
