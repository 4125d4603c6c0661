use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("cannot open table file location: {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
    #[display("catalog run failed")]
    Catalog,
}
