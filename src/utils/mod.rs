pub mod extractor;
pub mod filename;
pub mod parameter_error_handler;
pub mod password;
pub mod redirect;
pub mod session;
pub mod validate;

pub use extractor::{SafeClassIdI64, SafeStoredFilename};
pub use parameter_error_handler::form_error_handler;
pub use redirect::{redirect, redirect_with_flash};
pub use session::{Flash, SessionToken};
