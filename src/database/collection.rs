use std::fmt;

/// Canonical resource-name table. Every handler and backend resolves its
/// collection through here; no other module spells a collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
    Cart,
    Orders,
    OrderItems,
    Reviews,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Users,
        Collection::Products,
        Collection::Cart,
        Collection::Orders,
        Collection::OrderItems,
        Collection::Reviews,
    ];

    /// Document-collection name as the storefront has always called it.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Products => "Products",
            Collection::Cart => "Cart",
            Collection::Orders => "Orders",
            Collection::OrderItems => "OrderItems",
            Collection::Reviews => "Reviews",
        }
    }

    /// Backing table for the Postgres document store.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Cart => "cart",
            Collection::Orders => "orders",
            Collection::OrderItems => "order_items",
            Collection::Reviews => "reviews",
        }
    }

    /// Singular label used in client-facing messages ("Invalid order ID").
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Users => "user",
            Collection::Products => "product",
            Collection::Cart => "cart item",
            Collection::Orders => "order",
            Collection::OrderItems => "order item",
            Collection::Reviews => "review",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_tables_are_unique() {
        let names: HashSet<_> = Collection::ALL.iter().map(|c| c.name()).collect();
        let tables: HashSet<_> = Collection::ALL.iter().map(|c| c.table()).collect();
        assert_eq!(names.len(), Collection::ALL.len());
        assert_eq!(tables.len(), Collection::ALL.len());
    }

    #[test]
    fn order_items_has_single_canonical_name() {
        assert_eq!(Collection::OrderItems.name(), "OrderItems");
        assert_eq!(Collection::OrderItems.table(), "order_items");
    }
}
