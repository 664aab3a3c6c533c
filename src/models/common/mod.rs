pub mod error_code;
pub mod pagination;
pub mod response;
pub mod validation;

pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use validation::{FieldError, FieldErrors};
