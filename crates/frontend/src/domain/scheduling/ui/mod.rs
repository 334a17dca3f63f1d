mod booking;
mod page;

pub use page::SchedulingPage;
