/// Which navigation buttons are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub login: bool,
    pub register: bool,
    pub profile: bool,
    pub logout: bool,
    pub admin: bool,
}

impl Navigation {
    pub fn new(is_authenticated: bool, is_admin: bool) -> Self {
        Self {
            login: !is_authenticated,
            register: !is_authenticated,
            profile: is_authenticated,
            logout: is_authenticated,
            admin: is_admin,
        }
    }
}
