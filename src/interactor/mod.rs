pub mod token_interactor;

pub use token_interactor::{TokenInteractor, TokenInteractorImpl};
