pub mod state;
pub mod validator;
