#[derive(thiserror::Error, Debug)]
pub enum JSError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Host member not found: {type_name}.{name}")]
    MemberNotFound { type_name: String, name: String },

    #[error("Host array has no modifiable member '{name}'")]
    UnsupportedMember { name: String },

    #[error("Host array index {index} is out of range [0, {max}]")]
    IndexOutOfBounds { index: isize, max: isize },

    #[error("Cannot convert {value} to host type {target}")]
    CoercionError { value: String, target: String },

    #[error("{method} expects at least one argument")]
    ArityError { method: String },
}
