#[cfg(test)]
pub(crate) mod testutil;

pub mod batches;
pub mod cascade;
pub mod courses;
pub mod enrollment;
pub mod grades;
pub mod students;
pub mod submissions;
pub mod sync;
pub mod tasks;

pub use batches::BatchService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use students::StudentService;
pub use submissions::SubmissionService;
pub use tasks::TaskService;
