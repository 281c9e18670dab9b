//! # Catalog State
//!
//! The menu, shared between the storefront routes (read) and the menu
//! management routes (write).
//!
//! ## Thread Safety
//! Wrapped in `Mutex` because menu edits and storefront reads can hit the
//! state concurrently. Operations are short (in-memory list walks), so a
//! plain mutex is enough; the lock is never held across an await point.

use std::sync::Mutex;

use deliverypro_core::{Catalog, Product};

/// Shared catalog state.
#[derive(Debug)]
pub struct CatalogState {
    catalog: Mutex<Catalog>,
}

impl CatalogState {
    /// Creates the state around an initial catalog.
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Mutex::new(catalog),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.lock().expect("catalog mutex poisoned");
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.lock().expect("catalog mutex poisoned");
        f(&mut catalog)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::new(Catalog::new(demo_menu()))
    }
}

/// The demo pizzeria menu every fresh server starts with.
///
/// Ids are stable so the frontend demo flows can hardcode them.
pub fn demo_menu() -> Vec<Product> {
    let mk = |id: &str,
              name: &str,
              description: &str,
              price_cents: i64,
              category: &str,
              popular: bool| Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        category: category.to_string(),
        image_url: None,
        popular,
        available: true,
    };

    vec![
        mk(
            "1",
            "Pizza Margherita",
            "Molho de tomate caseiro, mussarela de búfala, manjericão fresco e azeite extravirgem",
            4590,
            "Pizzas",
            true,
        ),
        mk(
            "2",
            "Pizza Pepperoni",
            "Molho de tomate, mussarela, pepperoni italiano e orégano",
            5290,
            "Pizzas",
            true,
        ),
        mk(
            "3",
            "Pizza Portuguesa",
            "Molho de tomate, mussarela, presunto, ovo, cebola, azeitona e orégano",
            4890,
            "Pizzas",
            false,
        ),
        mk(
            "4",
            "Hambúrguer Artesanal",
            "Blend 180g, queijo cheddar, alface, tomate, cebola roxa e molho especial",
            3290,
            "Hambúrguers",
            true,
        ),
        mk(
            "5",
            "Cheeseburger Duplo",
            "Dois blends 150g, queijo cheddar duplo, picles, cebola e molho burger",
            4290,
            "Hambúrguers",
            false,
        ),
        mk(
            "6",
            "Batata Frita Grande",
            "Batatas cortadas na hora, temperadas com sal e ervas especiais",
            1890,
            "Acompanhamentos",
            false,
        ),
        mk(
            "7",
            "Onion Rings",
            "Anéis de cebola empanados e fritos, acompanha molho barbecue",
            1690,
            "Acompanhamentos",
            false,
        ),
        mk(
            "8",
            "Coca-Cola 2L",
            "Refrigerante de cola gelado, perfeito para acompanhar sua refeição",
            850,
            "Bebidas",
            false,
        ),
        mk(
            "9",
            "Suco Natural de Laranja",
            "Suco de laranja 100% natural, sem conservantes ou açúcar adicionado",
            790,
            "Bebidas",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_menu_shape() {
        let menu = demo_menu();
        assert_eq!(menu.len(), 9);
        assert!(menu.iter().all(|p| p.available));

        let catalog = Catalog::new(menu);
        assert_eq!(
            catalog.categories(),
            vec!["Pizzas", "Hambúrguers", "Acompanhamentos", "Bebidas"]
        );
    }

    #[test]
    fn test_state_accessors() {
        let state = CatalogState::default();

        let count = state.with_catalog(|c| c.products().len());
        assert_eq!(count, 9);

        state.with_catalog_mut(|c| {
            c.update(
                "1",
                deliverypro_core::MenuItemUpdate {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .map(|_| ())
        })
        .unwrap();

        assert_eq!(state.with_catalog(|c| c.unavailable_count()), 1);
    }
}
