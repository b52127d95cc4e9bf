use std::fmt;

use crate::validate::Validation;

#[derive(Debug)]
pub enum Error {
    Form(serde_json::Error),
    Invalid(Validation),
    Font(String),
    Pdf(String),
    Zip(zip::result::ZipError),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Form(e) => write!(f, "invalid paper form: {e}"),
            Error::Invalid(validation) => {
                let messages: Vec<String> = validation
                    .problems()
                    .iter()
                    .map(|p| p.message().to_string())
                    .collect();
                write!(f, "paper is not ready: {}", messages.join(" "))
            }
            Error::Font(reason) => write!(f, "font error: {reason}"),
            Error::Pdf(e) => write!(f, "PDF error: {e}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Form(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
