//! Intent taxonomy for the customer chatbot.
//!
//! The intent label is chosen by an upstream classifier; this module only
//! defines the closed set the resolver knows how to answer and the routing
//! facts attached to each variant (navigation path, whether a backend call
//! is involved).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Orders,
    OrderDetails,
    TrackOrder,
    Wishlist,
    Cart,
    CartDetails,
    Payment,
    Coverage,
    Category,
    Vendors,
    GoToOrders,
    GoToCart,
    GoToProducts,
    GoToVendors,
    GoToSettings,
    GoToProfile,
    GoToHome,
    GoToWishlist,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Intent {
    /// Labels outside the known set map to `None`; the resolver answers those
    /// with an empty reply so the caller can fall back to a generic answer.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "orders" => Some(Self::Orders),
            "order_details" => Some(Self::OrderDetails),
            "track_order" => Some(Self::TrackOrder),
            "wishlist" => Some(Self::Wishlist),
            "cart" => Some(Self::Cart),
            "cart_details" => Some(Self::CartDetails),
            "payment" => Some(Self::Payment),
            "coverage" => Some(Self::Coverage),
            "category" => Some(Self::Category),
            "vendors" => Some(Self::Vendors),
            "go_to_orders" => Some(Self::GoToOrders),
            "go_to_cart" => Some(Self::GoToCart),
            "go_to_products" => Some(Self::GoToProducts),
            "go_to_vendors" => Some(Self::GoToVendors),
            "go_to_settings" => Some(Self::GoToSettings),
            "go_to_profile" => Some(Self::GoToProfile),
            "go_to_home" => Some(Self::GoToHome),
            "go_to_wishlist" => Some(Self::GoToWishlist),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::OrderDetails => "order_details",
            Self::TrackOrder => "track_order",
            Self::Wishlist => "wishlist",
            Self::Cart => "cart",
            Self::CartDetails => "cart_details",
            Self::Payment => "payment",
            Self::Coverage => "coverage",
            Self::Category => "category",
            Self::Vendors => "vendors",
            Self::GoToOrders => "go_to_orders",
            Self::GoToCart => "go_to_cart",
            Self::GoToProducts => "go_to_products",
            Self::GoToVendors => "go_to_vendors",
            Self::GoToSettings => "go_to_settings",
            Self::GoToProfile => "go_to_profile",
            Self::GoToHome => "go_to_home",
            Self::GoToWishlist => "go_to_wishlist",
        }
    }

    /// Frontend path suffix for navigation intents, `None` for everything else.
    pub fn navigation_path(&self) -> Option<&'static str> {
        match self {
            Self::GoToOrders => Some("/customer/orders"),
            Self::GoToCart => Some("/customer/cart"),
            Self::GoToProducts => Some("/customer/products"),
            Self::GoToVendors => Some("/customer/stores"),
            Self::GoToSettings => Some("/customer/settings"),
            Self::GoToProfile => Some("/customer/profile"),
            Self::GoToHome => Some("/customer/home"),
            Self::GoToWishlist => Some("/customer/wishlist"),
            _ => None,
        }
    }

    /// Whether answering this intent issues a backend call. Static and
    /// navigation intents never touch the network.
    pub fn requires_backend(&self) -> bool {
        match self {
            Self::Orders
            | Self::OrderDetails
            | Self::TrackOrder
            | Self::Wishlist
            | Self::Cart
            | Self::CartDetails
            | Self::Category
            | Self::Vendors => true,
            Self::Payment | Self::Coverage => false,
            _ => self.navigation_path().is_none(),
        }
    }

    pub const ALL: [Intent; 18] = [
        Intent::Orders,
        Intent::OrderDetails,
        Intent::TrackOrder,
        Intent::Wishlist,
        Intent::Cart,
        Intent::CartDetails,
        Intent::Payment,
        Intent::Coverage,
        Intent::Category,
        Intent::Vendors,
        Intent::GoToOrders,
        Intent::GoToCart,
        Intent::GoToProducts,
        Intent::GoToVendors,
        Intent::GoToSettings,
        Intent::GoToProfile,
        Intent::GoToHome,
        Intent::GoToWishlist,
    ];
}

#[cfg(test)]
mod tests {
    use super::Intent;

    #[test]
    fn parse_round_trips_every_known_label() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn unknown_labels_parse_to_none() {
        for raw in ["", "refund", "ORDERS", "go_to_checkout", "order details"] {
            assert_eq!(Intent::parse(raw), None, "`{raw}` should not resolve to an intent");
        }
    }

    #[test]
    fn navigation_intents_carry_paths_and_skip_the_backend() {
        let navigation: Vec<Intent> =
            Intent::ALL.iter().copied().filter(|i| i.navigation_path().is_some()).collect();
        assert_eq!(navigation.len(), 8);

        for intent in navigation {
            assert!(!intent.requires_backend(), "{intent} must not issue a backend call");
            let path = intent.navigation_path().expect("navigation path");
            assert!(path.starts_with("/customer/"), "{intent} path should be under /customer/");
        }
    }

    #[test]
    fn static_intents_skip_the_backend() {
        assert!(!Intent::Payment.requires_backend());
        assert!(!Intent::Coverage.requires_backend());
        assert!(Intent::Orders.requires_backend());
        assert!(Intent::Category.requires_backend());
    }
}
