mod components;
mod coords;
mod geolocation;
mod pages;
mod surface;

use dioxus::prelude::*;
use radar_shared::config::MapVariant;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/national")]
    National {},
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::radar_map::RadarMap { variant: MapVariant::Local }
    }
}

#[component]
fn National() -> Element {
    rsx! {
        pages::radar_map::RadarMap { variant: MapVariant::National }
    }
}

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
