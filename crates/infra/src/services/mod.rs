mod notifier;

pub use notifier::{
    DeliveryInfo, EmailGatewayNotifier, EmailMessage, INotifier, InMemoryNotifier,
};
