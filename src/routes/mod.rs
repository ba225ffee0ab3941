pub mod batches;

pub mod courses;

pub mod grades;

pub mod students;

pub mod submissions;

pub mod tasks;

pub use batches::configure_batch_routes;
pub use courses::configure_course_routes;
pub use grades::configure_grade_routes;
pub use students::configure_student_routes;
pub use submissions::configure_submission_routes;
pub use tasks::configure_task_routes;
