//! Catalog
//!
//! The product page: the fixed [`Product`] plus display-only details loaded
//! from the bundled YAML fixture, and the size/colour the shopper has picked.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, RUNNING_SHOES};

const RUNNING_SHOES_FIXTURE_YAML: &str = include_str!("../fixtures/products/running-shoes.yml");

/// Size preselected on the product page and the checkout form.
pub const DEFAULT_SIZE: &str = "9";

/// Colour preselected on the product page and the checkout form.
pub const DEFAULT_COLOR: &str = "Black";

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error
    #[error("Failed to parse product details: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Fixture lists no sizes or no colours
    #[error("Product details must list at least one size and one color")]
    NoOptions,

    /// Size not offered for this product
    #[error("Size {0} is not available")]
    UnknownSize(String),

    /// Colour not offered for this product
    #[error("Color {0} is not available")]
    UnknownColor(String),
}

/// Named product specification row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Specification {
    /// Row label
    pub name: String,

    /// Row value
    pub value: String,
}

/// Display-only product details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDetails {
    /// Average review rating out of 5
    pub rating: f32,

    /// Number of reviews
    pub reviews: u32,

    /// Sizes on offer
    pub sizes: Vec<String>,

    /// Colours on offer
    pub colors: Vec<String>,

    /// Marketing description
    pub description: String,

    /// Feature bullet points
    pub features: Vec<String>,

    /// Specification table rows, in display order
    pub specifications: Vec<Specification>,
}

impl ProductDetails {
    /// Parse product details from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed or lists no sizes or colours.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let details: Self = serde_norway::from_str(yaml)?;

        if details.sizes.is_empty() || details.colors.is_empty() {
            return Err(CatalogError::NoOptions);
        }

        Ok(details)
    }

    /// Details for the running shoes, from the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture does not parse.
    pub fn running_shoes() -> Result<Self, CatalogError> {
        Self::from_yaml(RUNNING_SHOES_FIXTURE_YAML)
    }

    /// Number of whole stars to fill when rendering the rating.
    pub fn full_stars(&self) -> usize {
        let clamped = self.rating.clamp(0.0, 5.0);

        (0_u8..5).filter(|star| f32::from(*star) + 1.0 <= clamped).count()
    }
}

/// Product page state: what is on sale and what the shopper has picked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    product: Product,
    details: ProductDetails,
    selected_size: String,
    selected_color: String,
}

impl ProductPage {
    /// Build the page with the default size and colour selected.
    ///
    /// Falls back to the first listed option when a default is not on offer.
    pub fn new(product: Product, details: ProductDetails) -> Self {
        let selected_size = pick_default(&details.sizes, DEFAULT_SIZE);
        let selected_color = pick_default(&details.colors, DEFAULT_COLOR);

        Self {
            product,
            details,
            selected_size,
            selected_color,
        }
    }

    /// The running shoes page.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled details fixture does not parse.
    pub fn running_shoes() -> Result<Self, CatalogError> {
        Ok(Self::new(RUNNING_SHOES, ProductDetails::running_shoes()?))
    }

    /// Product on sale.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Display-only details.
    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    /// Currently selected size.
    pub fn selected_size(&self) -> &str {
        &self.selected_size
    }

    /// Currently selected colour.
    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    /// Select a size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSize`] if the size is not on offer; the
    /// previous selection is kept.
    pub fn select_size(&mut self, size: &str) -> Result<(), CatalogError> {
        if !self.details.sizes.iter().any(|offered| offered == size) {
            return Err(CatalogError::UnknownSize(size.to_string()));
        }

        debug!(size, "selected size");

        size.clone_into(&mut self.selected_size);

        Ok(())
    }

    /// Select a colour.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownColor`] if the colour is not on offer;
    /// the previous selection is kept.
    pub fn select_color(&mut self, color: &str) -> Result<(), CatalogError> {
        if !self.details.colors.iter().any(|offered| offered == color) {
            return Err(CatalogError::UnknownColor(color.to_string()));
        }

        debug!(color, "selected color");

        color.clone_into(&mut self.selected_color);

        Ok(())
    }
}

fn pick_default(options: &[String], preferred: &str) -> String {
    options
        .iter()
        .find(|option| *option == preferred)
        .or_else(|| options.first())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_fixture_parses() -> TestResult {
        let details = ProductDetails::running_shoes()?;

        assert_eq!(details.reviews, 1234);
        assert_eq!(details.sizes, ["7", "8", "9", "10", "11"]);
        assert_eq!(details.colors, ["Black", "White", "Blue", "Red"]);
        assert_eq!(details.features.len(), 5);

        Ok(())
    }

    #[test]
    fn specifications_keep_fixture_order() -> TestResult {
        let details = ProductDetails::running_shoes()?;

        let names: Vec<&str> = details
            .specifications
            .iter()
            .map(|spec| spec.name.as_str())
            .collect();

        assert_eq!(
            names,
            ["Material", "Weight", "Heel Drop", "Arch Support", "Occasion"]
        );

        Ok(())
    }

    #[test]
    fn rating_of_four_and_a_half_fills_four_stars() -> TestResult {
        let details = ProductDetails::running_shoes()?;

        assert_eq!(details.full_stars(), 4);

        Ok(())
    }

    #[test]
    fn details_without_sizes_are_rejected() {
        let yaml = r#"
rating: 4.0
reviews: 1
sizes: []
colors: ["Black"]
description: ""
features: []
specifications: []
"#;

        assert!(matches!(
            ProductDetails::from_yaml(yaml),
            Err(CatalogError::NoOptions)
        ));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = ProductDetails::from_yaml("invalid: yaml: structure: [[[");

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn page_starts_with_default_selection() -> TestResult {
        let page = ProductPage::running_shoes()?;

        assert_eq!(page.selected_size(), "9");
        assert_eq!(page.selected_color(), "Black");

        Ok(())
    }

    #[test]
    fn select_size_accepts_offered_size() -> TestResult {
        let mut page = ProductPage::running_shoes()?;

        page.select_size("11")?;

        assert_eq!(page.selected_size(), "11");
        assert_eq!(page.selected_color(), "Black");

        Ok(())
    }

    #[test]
    fn select_size_rejects_unknown_size_and_keeps_selection() -> TestResult {
        let mut page = ProductPage::running_shoes()?;

        let result = page.select_size("13");

        assert!(matches!(result, Err(CatalogError::UnknownSize(size)) if size == "13"));
        assert_eq!(page.selected_size(), "9");

        Ok(())
    }

    #[test]
    fn select_color_rejects_unknown_color() -> TestResult {
        let mut page = ProductPage::running_shoes()?;

        assert!(page.select_color("Green").is_err());

        page.select_color("Blue")?;

        assert_eq!(page.selected_color(), "Blue");

        Ok(())
    }

    #[test]
    fn missing_default_falls_back_to_first_option() {
        let details = ProductDetails {
            rating: 3.0,
            reviews: 0,
            sizes: vec!["6".to_string(), "7".to_string()],
            colors: vec!["Grey".to_string()],
            description: String::new(),
            features: Vec::new(),
            specifications: Vec::new(),
        };

        let page = ProductPage::new(RUNNING_SHOES, details);

        assert_eq!(page.selected_size(), "6");
        assert_eq!(page.selected_color(), "Grey");
    }
}
