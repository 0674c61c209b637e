#[path = "../test_utils.rs"]
mod test_utils;

mod attendance_test;
mod directory_test;
mod leave_test;
mod middleware_test;
mod shift_test;
