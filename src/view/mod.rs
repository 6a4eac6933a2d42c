pub mod token_view;

pub use token_view::{ConsoleTokenView, TokenCard, TokenView};
