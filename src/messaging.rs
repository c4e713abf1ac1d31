//! Customer-facing order messages and the WhatsApp deep link that carries them.
//!
//! Money is only turned into text here: two decimals, comma separator,
//! `R$ ` prefix.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::Catalog;
use crate::customization::{build_order_summary, Selection};
use crate::models::{Bouquet, SizeOption};

const WHATSAPP_BASE: &str = "https://wa.me";
const CLOSING: &str = "Por favor, confirme a disponibilidade!";

/// `12.9` becomes `"12,90"`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}").replace('.', ",")
}

/// `12.9` becomes `"R$ 12,90"`.
pub fn format_brl(value: Decimal) -> String {
    format!("R$ {}", format_amount(value))
}

/// Message for a custom bouquet built in the customizer.
///
/// The total is passed in rather than recomputed so the message always shows
/// the figure the customer saw.
pub fn format_message(selection: &Selection, catalog: &Catalog, total: Decimal) -> String {
    let summary = build_order_summary(selection, catalog);
    let mut message = String::from("Olá! Gostaria de fazer um pedido de buquê personalizado:\n\n");

    if !summary.flowers.is_empty() {
        message.push_str("*Flores:*\n");
        for line in &summary.flowers {
            message.push_str(&format!(
                "  - {}: {}x ({})\n",
                line.name,
                line.quantity,
                format_brl(line.subtotal)
            ));
        }
        message.push('\n');
    }

    if let Some(colors) = summary.color_list() {
        message.push_str(&format!("*Cores escolhidas:* {colors}\n\n"));
    }

    if !summary.complements.is_empty() {
        message.push_str("*Complementos:*\n");
        for line in &summary.complements {
            message.push_str(&format!("  - {} ({})\n", line.name, format_brl(line.price)));
        }
        message.push('\n');
    }

    message.push_str(&format!("*Total estimado:* {}\n\n", format_brl(total)));
    message.push_str(CLOSING);
    message
}

/// Message for a ready-made bouquet, with the optional size.
pub fn format_bouquet_message(
    bouquet: &Bouquet,
    size: Option<&SizeOption>,
    price: Decimal,
) -> String {
    let size_name = size.map(|s| s.name.as_str()).unwrap_or("Padrão");
    format!(
        "Olá! Gostaria de fazer um pedido:\n\n\
         *Pedido - {}*\n\
         Tamanho: {}\n\
         Valor: {}\n\n\
         {CLOSING}",
        bouquet.name,
        size_name,
        format_brl(price)
    )
}

/// `https://wa.me/{digits}?text={message}` with the message percent-encoded.
///
/// Anything that is not a digit is stripped from the contact number.
pub fn whatsapp_link(contact_number: &str, message: &str) -> String {
    let digits: String = contact_number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{WHATSAPP_BASE}/{digits}?text={}",
        urlencoding::encode(message)
    )
}
