use crate::editor::ConstraintError;
use crate::export::ExportError;
use crate::geometry::GeometryError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
