//! Put a few buttons on the map and click them.
//!
//! Run with: cargo run --example map_buttons

use std::cell::Cell;
use std::rc::Rc;
use track_profile::{
    ButtonContent, ButtonControl, ButtonOptions, ControlLayer, Icon, MaterialDesignTheme,
    OverlayPosition,
};

fn main() {
    let mut map = ControlLayer::new();
    let clicks = Rc::new(Cell::new(0));

    let mut load = {
        let mut options = ButtonOptions::new(ButtonContent::Icon(Icon::font_awesome("fa-upload")));
        options.title = Some("Load track".to_string());
        let clicks = clicks.clone();
        ButtonControl::new(options, move || {
            clicks.set(clicks.get() + 1);
            println!("   load clicked");
        })
    };

    let mut chart = {
        let mut options = ButtonOptions::new(ButtonContent::Icon(Icon::material(
            "timeline",
            Some(MaterialDesignTheme::Outlined),
        )));
        options.position = OverlayPosition::TopRight;
        ButtonControl::new(options, || println!("   chart toggled"))
    };

    let mut about = ButtonControl::new(
        ButtonOptions::new(ButtonContent::Text("?".to_string())),
        || println!("   about clicked"),
    );

    load.attach(&mut map);
    chart.attach(&mut map);
    about.attach(&mut map);

    println!("Top left: {:?}", map.surfaces_at(OverlayPosition::TopLeft));
    println!("Top right: {:?}\n", map.surfaces_at(OverlayPosition::TopRight));

    for button in [&load, &chart, &about] {
        println!("{:?}", button.surface().map(|s| &s.root));
        button.click();
    }

    about.detach(&mut map);
    println!("\nAbout detached, click handled: {}", about.click());
    println!("Load clicks: {}", clicks.get());
}
