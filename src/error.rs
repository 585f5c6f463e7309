use std::fmt::Display;

#[derive(Debug)]
pub enum SeismiteError {
    Input(String),
    Modal(String),
    Solver(String),
    PostProcessor(String),
}

impl Display for SeismiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (err_name, value) = match self {
            SeismiteError::Input(v) => ("Input", v),
            SeismiteError::Modal(v) => ("Modal", v),
            SeismiteError::Solver(v) => ("Solver", v),
            SeismiteError::PostProcessor(v) => ("Post Processor", v),
        };

        write!(f, "{} error: {}", err_name, value)
    }
}

impl std::error::Error for SeismiteError {}
