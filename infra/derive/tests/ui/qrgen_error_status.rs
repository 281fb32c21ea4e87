use qrgen_derive::qrgen_error;
use std::borrow::Cow;

#[qrgen_error]
pub enum DemoError {
    #[status(400)]
    #[error("Please provide a value")]
    Empty { context: Option<Cow<'static, str>> },

    #[status(404)]
    #[error("Missing{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    assert_eq!(DemoError::Empty { context: None }.status_code(), 400);
    assert_eq!(DemoError::Missing { message: "x".into(), context: None }.status_code(), 404);
    assert_eq!(DemoError::from("oops").status_code(), 500);
}
