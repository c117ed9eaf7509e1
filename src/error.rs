use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PipelineError {
    NoInputFiles(PathBuf),
    NoParseableDates(PathBuf),
    ShapeMismatch {
        path: PathBuf,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    NoGeometries(PathBuf),
    Io(std::io::Error),
    Gdal(gdal::errors::GdalError),
    Pattern(glob::PatternError),
    Image(image::ImageError),
    Encode(String),
    Chart(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NoInputFiles(dir) => {
                write!(f, "no .tif files found in {}", dir.display())
            }
            PipelineError::NoParseableDates(dir) => write!(
                f,
                "no file in {} matches the *_YYYY_MM.tif naming pattern",
                dir.display()
            ),
            PipelineError::ShapeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{} is {}x{} but the first raster was {}x{}",
                path.display(),
                actual.0,
                actual.1,
                expected.0,
                expected.1
            ),
            PipelineError::NoGeometries(path) => {
                write!(f, "no polygon geometries found in {}", path.display())
            }
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
            PipelineError::Gdal(e) => write!(f, "GDAL error: {}", e),
            PipelineError::Pattern(e) => write!(f, "invalid glob pattern: {}", e),
            PipelineError::Image(e) => write!(f, "image error: {}", e),
            PipelineError::Encode(msg) => write!(f, "encoding failed: {}", msg),
            PipelineError::Chart(msg) => write!(f, "chart rendering failed: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> PipelineError {
        PipelineError::Io(err)
    }
}

impl From<gdal::errors::GdalError> for PipelineError {
    fn from(err: gdal::errors::GdalError) -> PipelineError {
        PipelineError::Gdal(err)
    }
}

impl From<glob::PatternError> for PipelineError {
    fn from(err: glob::PatternError) -> PipelineError {
        PipelineError::Pattern(err)
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> PipelineError {
        PipelineError::Image(err)
    }
}
