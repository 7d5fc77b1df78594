extern crate anyhow;
extern crate reqwest;
extern crate serde_xml_rs;
extern crate std;

pub type IrDashResult<T> = std::result::Result<T, IrDashError>;

#[derive(Debug)]
pub enum IrDashError {
    HttpError(reqwest::Error),
    XmlError(serde_xml_rs::Error),
    IoError(std::io::Error),
    AnnotatedError(anyhow::Error),
    OtherError(String),
}

pub fn make_error(msg: &str) -> IrDashError {
    return IrDashError::OtherError(msg.to_string());
}

impl std::fmt::Display for IrDashError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            IrDashError::HttpError(ref err) => {
                return write!(f, "HTTP Error: {}", err);
            },
            IrDashError::XmlError(ref err) => {
                return write!(f, "XML Error: {}", err);
            },
            IrDashError::IoError(ref err) => {
                return write!(f, "IO Error: {}", err);
            },
            IrDashError::AnnotatedError(ref err) => {
                return write!(f, "Error: {:#}", err);
            },
            IrDashError::OtherError(ref msg) => {
                return write!(f, "Error: {}", msg);
            },
        }
    }
}

impl std::error::Error for IrDashError {}

impl From<reqwest::Error> for IrDashError {
    fn from(err: reqwest::Error) -> IrDashError {
        return IrDashError::HttpError(err);
    }
}

impl From<serde_xml_rs::Error> for IrDashError {
    fn from(err: serde_xml_rs::Error) -> IrDashError {
        return IrDashError::XmlError(err);
    }
}

impl From<std::io::Error> for IrDashError {
    fn from(err: std::io::Error) -> IrDashError {
        return IrDashError::IoError(err);
    }
}

impl From<anyhow::Error> for IrDashError {
    fn from(err: anyhow::Error) -> IrDashError {
        return IrDashError::AnnotatedError(err);
    }
}
