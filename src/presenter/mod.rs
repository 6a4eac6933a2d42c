pub mod token_presenter;

pub use token_presenter::{TokenPresenter, TokenPresenterImpl};
