//! Order confirmation link construction.

use crate::error::LinkError;
use tracing::debug;
use url::form_urlencoded;
use url::Url;

/// Checkout page the generated links point at.
pub const DEFAULT_CHECKOUT_URL: &str = "https://www.popmart.com/vn/order-confirmation";

/// Identifier and title slug taken from a product page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Segment following `products` in the path
    pub spu_id: String,
    /// Last path segment, lower-cased
    pub title_slug: String,
}

impl ProductRef {
    /// Extracts the product identifier and slug from a product page URL.
    pub fn from_url(product_url: &str) -> Result<Self, LinkError> {
        let url = Url::parse(product_url)
            .map_err(|_| LinkError::InvalidUrl { url: product_url.to_string() })?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let spu_id = segments
            .iter()
            .position(|s| s.eq_ignore_ascii_case("products"))
            .and_then(|i| segments.get(i + 1))
            .map(|s| s.to_string())
            .unwrap_or_default();

        if spu_id.is_empty() {
            return Err(LinkError::MissingProductId { url: product_url.to_string() });
        }

        let title_slug = segments.last().map(|s| s.to_lowercase()).unwrap_or_default();

        Ok(Self { spu_id, title_slug })
    }
}

/// Builds order confirmation links against a checkout address.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    checkout_url: String,
}

impl LinkBuilder {
    /// Creates a builder for the given checkout address.
    pub fn new(checkout_url: impl Into<String>) -> Self {
        Self { checkout_url: checkout_url.into() }
    }

    /// Returns the checkout address.
    pub fn checkout_url(&self) -> &str {
        &self.checkout_url
    }

    /// Builds the link for `count` units of `sku_id` of the product at `product_url`.
    pub fn build(&self, product_url: &str, sku_id: &str, count: u32) -> Result<String, LinkError> {
        let product = ProductRef::from_url(product_url)?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("spuId", &product.spu_id)
            .append_pair("skuId", sku_id)
            .append_pair("count", &count.to_string())
            .append_pair("spuTitle", &product.title_slug)
            .finish();

        let separator = if self.checkout_url.contains('?') { '&' } else { '?' };
        let link = format!("{}{}{}", self.checkout_url, separator, query);

        debug!("Built link for spu {} sku {}: {}", product.spu_id, sku_id, link);
        Ok(link)
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKOUT_URL)
    }
}

/// Builds a link against the default checkout address.
pub fn build_link(product_url: &str, sku_id: &str, count: u32) -> Result<String, LinkError> {
    LinkBuilder::default().build(product_url, sku_id, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_link_reference_case() {
        let link = build_link(
            "https://www.popmart.com/vn/products/6890/THE-MONSTERS-Big-into-Energy-Series",
            "10528",
            2,
        )
        .unwrap();
        assert_eq!(
            link,
            "https://www.popmart.com/vn/order-confirmation?spuId=6890&skuId=10528&count=2&spuTitle=the-monsters-big-into-energy-series"
        );
    }

    #[test]
    fn test_build_link_missing_products_segment() {
        let url = "https://www.popmart.com/vn/collection/45/Blind-Box";
        let err = build_link(url, "1", 1).unwrap_err();
        assert_eq!(err, LinkError::MissingProductId { url: url.to_string() });
    }

    #[test]
    fn test_build_link_products_is_last_segment() {
        let err = build_link("https://www.popmart.com/vn/products", "1", 1).unwrap_err();
        assert!(matches!(err, LinkError::MissingProductId { .. }));

        let err = build_link("https://www.popmart.com/vn/products/", "1", 1).unwrap_err();
        assert!(matches!(err, LinkError::MissingProductId { .. }));
    }

    #[test]
    fn test_build_link_invalid_url() {
        for bad in ["not a url", "", "/vn/products/1/x", "http://"] {
            let err = build_link(bad, "1", 1).unwrap_err();
            assert!(matches!(err, LinkError::InvalidUrl { .. }), "input: {:?}", bad);
        }
    }

    #[test]
    fn test_product_ref_case_insensitive_segment() {
        let product =
            ProductRef::from_url("https://www.popmart.com/vn/PRODUCTS/42/Foo-Bar").unwrap();
        assert_eq!(product.spu_id, "42");
        assert_eq!(product.title_slug, "foo-bar");
    }

    #[test]
    fn test_product_ref_first_products_segment_wins() {
        let product =
            ProductRef::from_url("https://example.com/products/1/products/2/Name").unwrap();
        assert_eq!(product.spu_id, "1");
        assert_eq!(product.title_slug, "name");
    }

    #[test]
    fn test_product_ref_ignores_empty_segments_and_query() {
        let product =
            ProductRef::from_url("https://example.com//products//77//Plain/?ref=home#top").unwrap();
        assert_eq!(product.spu_id, "77");
        assert_eq!(product.title_slug, "plain");
    }

    #[test]
    fn test_product_ref_slug_is_id_without_title() {
        let product = ProductRef::from_url("https://example.com/products/9").unwrap();
        assert_eq!(product.spu_id, "9");
        assert_eq!(product.title_slug, "9");
    }

    #[test]
    fn test_build_link_encodes_query_values() {
        let link = build_link("https://example.com/products/5/A-B", "x y&z", 1).unwrap();
        assert!(link.contains("skuId=x+y%26z"));
    }

    #[test]
    fn test_custom_checkout_url() {
        let builder = LinkBuilder::new("https://www.popmart.com/sg/order-confirmation");
        assert_eq!(builder.checkout_url(), "https://www.popmart.com/sg/order-confirmation");

        let link = builder.build("https://www.popmart.com/sg/products/1/Item", "2", 3).unwrap();
        assert!(link.starts_with("https://www.popmart.com/sg/order-confirmation?spuId=1&"));

        let builder = LinkBuilder::new("https://example.com/checkout?source=cli");
        let link = builder.build("https://example.com/products/1/Item", "2", 3).unwrap();
        assert!(link.starts_with("https://example.com/checkout?source=cli&spuId=1&"));
    }

    #[test]
    fn test_default_builder() {
        assert_eq!(LinkBuilder::default().checkout_url(), DEFAULT_CHECKOUT_URL);
    }
}
