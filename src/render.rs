//! Cart markup.
//!
//! Pure functions from cart state to item-list markup. The surface decides
//! where the markup lands; these functions only guarantee the display rules:
//! an empty cart renders the empty-state view, a discounted line renders the
//! struck-through original price next to the final price, and the platform's
//! default-variant placeholder is omitted.

use crate::{
    cart::{Cart, LineItem},
    money::FormatMoney,
};

/// Render the full item list, or the empty-state view when there are no
/// items.
#[must_use]
pub fn cart_markup(cart: &Cart, money: &dyn FormatMoney) -> String {
    if cart.is_empty() {
        return empty_markup();
    }

    cart.items
        .iter()
        .map(|line| line_markup(line, money))
        .collect()
}

/// Render one line item row.
#[must_use]
pub fn line_markup(line: &LineItem, money: &dyn FormatMoney) -> String {
    let id = escape(&line.id);
    let title = escape(&line.product_title);

    let image = line.image.as_deref().map_or_else(
        || r#"<div class="cart-item-placeholder"><span>No image</span></div>"#.to_owned(),
        |url| {
            format!(
                r#"<img src="{}" alt="{title}" width="80" height="100">"#,
                escape(url)
            )
        },
    );

    let variant = line.variant_label().map_or_else(String::new, |label| {
        format!(r#"<p class="cart-item-variant">{}</p>"#, escape(label))
    });

    let original_price = if line.has_discount() {
        format!(
            r#"<s class="cart-item-original-price">{}</s>"#,
            money.format(line.original_line_price)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="cart-item" data-line-id="{id}">
  <div class="cart-item-image">{image}</div>
  <div class="cart-item-details">
    <h4 class="cart-item-title">{title}</h4>
    {variant}
    <div class="cart-item-price-row">
      <span class="cart-item-price">{final_price}</span>
      {original_price}
    </div>
    <div class="cart-item-quantity">
      <button class="quantity-decrease" data-line-id="{id}" data-quantity="{decreased}" aria-label="Decrease quantity">-</button>
      <span class="quantity-display">{quantity}</span>
      <button class="quantity-increase" data-line-id="{id}" data-quantity="{increased}" aria-label="Increase quantity">+</button>
      <button class="cart-item-remove" data-line-id="{id}" aria-label="Remove item">×</button>
    </div>
  </div>
</div>"#,
        final_price = money.format(line.final_line_price),
        quantity = line.quantity,
        decreased = line.quantity.saturating_sub(1),
        increased = line.quantity.saturating_add(1),
    )
}

/// Render the empty-state view.
#[must_use]
pub fn empty_markup() -> String {
    r#"<div class="cart-empty-state">
  <h3 class="cart-empty-title">Your bag is empty</h3>
  <p class="cart-empty-text">Add some products to get started</p>
  <a href="/collections/all" class="cart-empty-button">Shop now</a>
</div>"#
        .to_owned()
}

/// Escape text interpolated into markup.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}
