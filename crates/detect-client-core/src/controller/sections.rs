use std::collections::BTreeSet;
use strum::{EnumIter, IntoEnumIterator as _};

/// The named regions of the page, only one of which is meant to be on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Section {
    Auth,
    Register,
    Profile,
    Predict,
    Admin,
}

impl Section {
    pub fn id(self) -> &'static str {
        match self {
            Section::Auth => "auth-section",
            Section::Register => "register-section",
            Section::Profile => "profile-section",
            Section::Predict => "predict-section",
            Section::Admin => "admin-section",
        }
    }
}

/// Tracks which sections carry the hidden marker
///
/// Starts with every section hidden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionVisibility {
    hidden: BTreeSet<Section>,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            hidden: Section::iter().collect(),
        }
    }
}

impl SectionVisibility {
    /// Removes the hidden marker
    pub fn show_section(&mut self, section: Section) {
        self.hidden.remove(&section);
    }

    /// Adds the hidden marker
    pub fn hide_section(&mut self, section: Section) {
        self.hidden.insert(section);
    }

    pub fn is_visible(&self, section: Section) -> bool {
        !self.hidden.contains(&section)
    }

    pub fn visible(&self) -> Vec<Section> {
        Section::iter().filter(|s| self.is_visible(*s)).collect()
    }
}

/// What the user is looking at. Visibility of the sections is derived from
/// this alone, see [`UiState::render`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// No session, the login form is shown
    #[default]
    LoggedOut,
    Login,
    Register,
    Profile,
    Predict,
    Admin,
}

impl UiState {
    pub fn section(self) -> Section {
        match self {
            UiState::LoggedOut | UiState::Login => Section::Auth,
            UiState::Register => Section::Register,
            UiState::Profile => Section::Profile,
            UiState::Predict => Section::Predict,
            UiState::Admin => Section::Admin,
        }
    }

    pub fn render(self) -> SectionVisibility {
        let mut result = SectionVisibility::default();
        result.show_section(self.section());
        result
    }
}
