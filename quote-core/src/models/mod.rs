mod course;
mod course_detail;
mod selection;

pub use course::{Course, CourseDuration};
pub use course_detail::CourseDetail;
pub use selection::Selection;
