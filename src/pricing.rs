use crate::models::{Catalog, DynamicOption, Product, ProductCharacteristic};

const SIZE_NAMES: [&str; 2] = ["размер", "size"];
const COLOUR_NAMES: [&str; 2] = ["цвет", "color"];

/// What the buyer has picked on a product page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub size: Option<String>,
    pub colour: Option<String>,
    /// Subsidy region code, only meaningful for certificates.
    pub region: Option<String>,
}

impl Selection {
    /// The `dynamic_options` payload for `POST /basket`, or `None` when nothing applies.
    pub fn dynamic_options(&self, product: &Product) -> Option<Vec<DynamicOption>> {
        let picked = [
            (size_characteristic(product), self.size.as_ref()),
            (colour_characteristic(product), self.colour.as_ref()),
        ];
        let options: Vec<DynamicOption> = picked
            .into_iter()
            .filter_map(|(characteristic, value)| {
                Some(DynamicOption {
                    id: characteristic?.id,
                    value: value?.clone(),
                    name: None,
                })
            })
            .collect();
        if options.is_empty() {
            None
        } else {
            Some(options)
        }
    }
}

/// Pre-select the first size and colour a product offers.
pub fn default_selection(product: &Product) -> Selection {
    let first = |c: Option<&ProductCharacteristic>| c.and_then(|c| c.value.first().cloned());
    Selection {
        size: first(size_characteristic(product)),
        colour: first(colour_characteristic(product)),
        region: None,
    }
}

/// Price to display for `product` under `selection`.
///
/// `None` means there is no price yet: a certificate without a region.
pub fn derive_price(product: &Product, selection: &Selection) -> Option<f64> {
    if product.catalog() == Catalog::Certificate {
        return selection
            .region
            .as_ref()
            .map(|_| product.certificate_price.unwrap_or(0.0));
    }

    let size_price = size_characteristic(product).and_then(|size| {
        let prices = size.prices.as_ref()?;
        let selected = selection.size.as_ref()?;
        let index = size.value.iter().position(|v| v == selected)?;
        prices.get(index).copied().filter(|price| *price != 0.0)
    });
    Some(size_price.unwrap_or(product.price))
}

fn size_characteristic(product: &Product) -> Option<&ProductCharacteristic> {
    SIZE_NAMES
        .iter()
        .find_map(|name| product.characteristic_named(name))
}

fn colour_characteristic(product: &Product) -> Option<&ProductCharacteristic> {
    COLOUR_NAMES
        .iter()
        .find_map(|name| product.characteristic_named(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Id;

    fn characteristic(id: i64, name: &str, values: &[&str], prices: Option<Vec<f64>>) -> ProductCharacteristic {
        ProductCharacteristic {
            id,
            name: name.to_string(),
            value: values.iter().map(|v| v.to_string()).collect(),
            prices,
        }
    }

    fn product(catalogs: i64, characteristic: Vec<ProductCharacteristic>) -> Product {
        Product {
            id: Id::from(10),
            article: "KR-10".to_string(),
            name: "Кресло-коляска".to_string(),
            price: 1000.0,
            old_price: None,
            preview: None,
            nameplate: None,
            catalogs: Some(catalogs),
            images: Vec::new(),
            description: None,
            characteristic,
            certificate_price: None,
            categories: Vec::new(),
        }
    }

    fn sized() -> Product {
        product(
            Catalog::REGULAR_CODE,
            vec![
                characteristic(3, "Размер", &["S", "M", "L", "XL"], Some(vec![900.0, 1100.0, 0.0])),
                characteristic(4, "Цвет", &["синий", "серый"], None),
            ],
        )
    }

    fn pick(size: Option<&str>) -> Selection {
        Selection {
            size: size.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_size_price_wins_when_present() {
        assert_eq!(derive_price(&sized(), &pick(Some("M"))), Some(1100.0));
        assert_eq!(derive_price(&sized(), &pick(Some("S"))), Some(900.0));
    }

    #[test]
    fn test_falls_back_to_base_price() {
        let p = sized();
        // zero entry
        assert_eq!(derive_price(&p, &pick(Some("L"))), Some(1000.0));
        // past the end of prices
        assert_eq!(derive_price(&p, &pick(Some("XL"))), Some(1000.0));
        assert_eq!(derive_price(&p, &pick(Some("XXL"))), Some(1000.0));
        assert_eq!(derive_price(&p, &pick(None)), Some(1000.0));
        assert_eq!(derive_price(&product(1, Vec::new()), &pick(Some("M"))), Some(1000.0));
    }

    #[test]
    fn test_english_size_name_is_recognised() {
        let p = product(1, vec![characteristic(1, "SIZE", &["40", "42"], Some(vec![0.0, 1500.0]))]);
        assert_eq!(derive_price(&p, &pick(Some("42"))), Some(1500.0));
    }

    #[test]
    fn test_certificate_needs_region() {
        let mut p = product(Catalog::CERTIFICATE_CODE, Vec::new());
        p.certificate_price = Some(18_500.0);
        assert_eq!(derive_price(&p, &Selection::default()), None);

        let with_region = Selection {
            region: Some("RU-MOW".to_string()),
            ..Default::default()
        };
        assert_eq!(derive_price(&p, &with_region), Some(18_500.0));

        p.certificate_price = None;
        assert_eq!(derive_price(&p, &with_region), Some(0.0));
    }

    #[test]
    fn test_default_selection_and_options() {
        let p = sized();
        let selection = default_selection(&p);
        assert_eq!(selection.size.as_deref(), Some("S"));
        assert_eq!(selection.colour.as_deref(), Some("синий"));

        let options = selection.dynamic_options(&p).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!((options[0].id, options[0].value.as_str()), (3, "S"));
        assert_eq!((options[1].id, options[1].value.as_str()), (4, "синий"));

        assert_eq!(Selection::default().dynamic_options(&p), None);
        assert_eq!(default_selection(&product(1, Vec::new())), Selection::default());
    }
}
