//! Auth screen state: login and register forms.

use notehub_core::api::auth::Registration;

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub confirm_password: TextField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            confirm_password: TextField::masked(),
        }
    }
}

impl RegisterForm {
    pub fn to_registration(&self) -> Registration {
        Registration {
            name: self.name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
            confirm_password: self.confirm_password.value().to_string(),
        }
    }
}

/// State of the unauthenticated screen.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub mode: AuthMode,
    pub login: LoginForm,
    pub register: RegisterForm,
    /// Index of the focused field in the active form.
    pub focus: usize,
    /// Shown above the form (e.g. after a forced logout).
    pub notice: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            focus: 0,
            notice: None,
        }
    }
}

impl AuthState {
    pub fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::Login => 2,
            AuthMode::Register => 4,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match (self.mode, self.focus) {
            (AuthMode::Login, 0) => &mut self.login.email,
            (AuthMode::Login, _) => &mut self.login.password,
            (AuthMode::Register, 0) => &mut self.register.name,
            (AuthMode::Register, 1) => &mut self.register.email,
            (AuthMode::Register, 2) => &mut self.register.password,
            (AuthMode::Register, _) => &mut self.register.confirm_password,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    pub fn is_last_field(&self) -> bool {
        self.focus + 1 == self.field_count()
    }

    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.focus = 0;
        self.notice = None;
    }

    /// Back to an empty login form, keeping `notice`.
    pub fn reset(&mut self, notice: Option<String>) {
        *self = Self {
            notice,
            ..Self::default()
        };
    }
}
