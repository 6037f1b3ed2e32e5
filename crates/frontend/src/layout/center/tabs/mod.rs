mod tab;
mod tabs;

pub use tabs::Tabs;
