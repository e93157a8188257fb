//! Property tests over arbitrary sequences of cart operations.

use proptest::prelude::*;
use storefront_data::FetchClient;
use storefront_kv::MemoryStore;
use storefront_state::prelude::*;
use storefront_state::testing::{CannedTransport, RecordingNavigator, RecordingNotifier};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Increase(usize),
    Decrease(usize),
    Remove(usize),
    Empty,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..6).prop_map(Op::Add),
        2 => (0usize..6).prop_map(Op::Increase),
        2 => (0usize..6).prop_map(Op::Decrease),
        1 => (0usize..8).prop_map(Op::Remove),
        1 => Just(Op::Empty),
    ]
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    let kinds = prop::sample::select(vec!["shoe", "shirt", "hat"]);
    prop::collection::vec((1u32..500, kinds), 6).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, kind))| {
                let price = cents as f64 / 100.0;
                Product::new(format!("p{}", i), format!("Product {}", i), price, kind)
            })
            .collect()
    })
}

fn new_state(products: Vec<Product>) -> ShopState {
    let mut state = ShopState::new(
        ShopConfig::default(),
        FetchClient::new(CannedTransport::new()),
        MemoryStore::new(),
        RecordingNavigator::new(),
        RecordingNotifier::new(),
    )
    .unwrap();
    state.set_all_products(products);
    state
}

fn expected_total(state: &ShopState) -> f64 {
    state
        .get_cart_added_products()
        .iter()
        .map(|p| p.price * p.qty as f64)
        .sum()
}

proptest! {
    #[test]
    fn test_total_always_matches_cart(
        products in catalog_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40)
    ) {
        let mut state = new_state(products);
        let mut catalog = state.get_all_products().unwrap();

        for op in ops {
            match op {
                Op::Add(i) => state.add_to_cart(&mut catalog[i]),
                Op::Increase(i) => { let _ = state.cart_product_manipulate(&catalog[i], true); }
                Op::Decrease(i) => { let _ = state.cart_product_manipulate(&catalog[i], false); }
                Op::Remove(i) => { let _ = state.remove_cart_single_item(i); }
                Op::Empty => state.empty_cart(),
            }

            prop_assert!((state.get_cart_total() - expected_total(&state)).abs() < 1e-9);

            let cart = state.get_cart_added_products();
            for (i, a) in cart.iter().enumerate() {
                for b in &cart[i + 1..] {
                    prop_assert!(!a.same_instance(b));
                }
            }
        }
    }

    #[test]
    fn test_cart_length_counts_distinct_instances(
        products in catalog_strategy(),
        picks in prop::collection::vec(0usize..6, 1..30)
    ) {
        let mut state = new_state(products);
        let mut catalog = state.get_all_products().unwrap();

        for &i in &picks {
            state.add_to_cart(&mut catalog[i]);
        }

        let mut distinct = picks.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(state.cart_len(), distinct.len());
        prop_assert_eq!(state.cart_item_count(), picks.len() as i64);
    }

    #[test]
    fn test_similar_products_contract(products in catalog_strategy(), pick in 0usize..6) {
        let state = new_state(products);
        let target = state.get_all_products().unwrap()[pick].clone();
        let similar = state.get_similar_products(&target.kind, target.id.as_str()).unwrap();

        prop_assert!(similar.len() <= 3);
        for p in &similar {
            prop_assert_eq!(&p.kind, &target.kind);
            prop_assert_ne!(&p.id, &target.id);
        }
        for pair in similar.windows(2) {
            prop_assert!(pair[0].price >= pair[1].price);
        }
    }

    #[test]
    fn test_empty_cart_resets_everything(
        products in catalog_strategy(),
        picks in prop::collection::vec(0usize..6, 0..20)
    ) {
        let mut state = new_state(products);
        let mut catalog = state.get_all_products().unwrap();
        for &i in &picks {
            state.add_to_cart(&mut catalog[i]);
        }

        state.empty_cart();

        prop_assert_eq!(state.cart_len(), 0);
        prop_assert_eq!(state.get_cart_total(), 0.0);
        prop_assert!(state.get_all_products().unwrap().iter().all(|p| p.qty == 1));
    }
}
