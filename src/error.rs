use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config")]
    Config(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("pixels")]
    Pixels(#[from] pixels::Error),
    #[error("event loop")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window")]
    Window(#[from] winit::error::OsError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
