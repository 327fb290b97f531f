pub mod admin;
pub mod assignment;
pub mod attendance;
pub mod complaint;
pub mod fee;
pub mod notice;
pub mod sclass;
pub mod student;
pub mod subject;
pub mod teacher;
