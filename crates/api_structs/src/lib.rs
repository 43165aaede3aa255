mod reminder;
mod status;
mod student;

pub mod dtos {
    pub use crate::reminder::dtos::*;
    pub use crate::student::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::student::api::*;
