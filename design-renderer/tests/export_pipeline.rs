//! Full pipeline: a design session driven through the real exporter,
//! from element placement to the cart payload.

use design_core::{DesignSession, MemoryCart, MemoryInventory, ProductType, View};
use design_renderer::{decode_data_uri, SurfaceExporter};

#[test]
fn single_sided_cart_image_is_decodable_png() {
    let mut session = DesignSession::new(ProductType::Tshirt).expect("session");
    session.add_text("HELLO", "#000000", "Arial");

    let mut inventory = MemoryInventory::new();
    inventory.set_stock(ProductType::Tshirt, "M", 3);
    let mut cart = MemoryCart::new();

    let exporter = SurfaceExporter::new();
    let item = session
        .add_to_cart(&mut inventory, &mut cart, &exporter)
        .expect("add to cart");

    let png = decode_data_uri(&item.image).expect("decode");
    assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    let decoded = image::load_from_memory(&png).expect("valid png");
    // Surface scale, no DPI upscaling.
    assert_eq!(decoded.width(), 500);
    assert_eq!(decoded.height(), 600);
}

#[test]
fn dual_sided_cart_carries_two_decodable_images() {
    let exporter = SurfaceExporter::new();
    let mut session = DesignSession::new(ProductType::Tshirt).expect("session");
    session.toggle_dual_sided(true, &exporter).expect("toggle");
    session.add_text("FRONT", "#000000", "Arial");
    session.change_view(View::Back, &exporter).expect("to back");
    session.add_emoji("🔥");

    let mut inventory = MemoryInventory::new();
    inventory.set_stock(ProductType::Tshirt, "L", 2);
    let mut cart = MemoryCart::new();

    session.select_size("L").expect("size");
    let item = session
        .add_to_cart(&mut inventory, &mut cart, &exporter)
        .expect("add to cart");

    assert!(decode_data_uri(&item.image).is_ok());
    assert!(decode_data_uri(&item.back_image.expect("back")).is_ok());
    assert_eq!(inventory.quantity(ProductType::Tshirt, "L"), 1);
}

#[test]
fn preview_export_does_not_mutate_the_surface() {
    let mut session = DesignSession::new(ProductType::Mug).expect("session");
    session.add_text("COFFEE", "#000000", "Arial");

    let before = session.surface().to_json().expect("json");
    let exporter = SurfaceExporter::new();
    let _preview = session.export_preview(&exporter).expect("preview");
    let after = session.surface().to_json().expect("json");

    assert_eq!(before, after);
}
