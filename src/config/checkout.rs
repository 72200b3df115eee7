//! Checkout Config

use clap::Args;

const DEFAULT_WHATSAPP_NUMBER: &str = "5511987654321";

const DEFAULT_GREETING: &str = "Olá! Gostaria de fazer o seguinte pedido:";

/// Checkout hand-off settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// `WhatsApp` number that receives orders, digits only with country code
    #[arg(long, env = "WHATSAPP_NUMBER", default_value = DEFAULT_WHATSAPP_NUMBER)]
    pub whatsapp_number: String,

    /// First line of the order summary
    #[arg(long, env = "CHECKOUT_GREETING", default_value = DEFAULT_GREETING)]
    pub greeting: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}
