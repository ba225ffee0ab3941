//! 预导入模块，方便使用

pub use super::batch_students::{
    ActiveModel as BatchStudentActiveModel, Entity as BatchStudents, Model as BatchStudentModel,
};
pub use super::batches::{ActiveModel as BatchActiveModel, Entity as Batches, Model as BatchModel};
pub use super::course_batches::{
    ActiveModel as CourseBatchActiveModel, Entity as CourseBatches, Model as CourseBatchModel,
};
pub use super::course_faculty::{
    ActiveModel as CourseFacultyActiveModel, Entity as CourseFaculty, Model as CourseFacultyModel,
};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
