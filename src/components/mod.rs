// ABOUTME: UI components for the terminal interface

pub mod analytics;
pub mod choose;
pub mod generating;
pub mod help;
pub mod layout;
pub mod palette;
pub mod publish;
pub mod review;
pub mod step_indicator;
pub mod text_field;

pub use analytics::AnalyticsComponent;
pub use choose::ChooseComponent;
pub use generating::GeneratingComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use publish::PublishComponent;
pub use review::ReviewComponent;
pub use step_indicator::StepIndicator;
