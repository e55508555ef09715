use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Product not found: {0}")]
    ProductNotFound(i32),
}

pub type DomainResult<T> = Result<T, DomainError>;
