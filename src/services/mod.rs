pub mod hosting;

#[cfg(test)]
pub mod stub;

pub use hosting::HostingService;
