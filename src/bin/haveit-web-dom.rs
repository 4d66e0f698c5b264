//! haveit DOM binary - binds the controllers to an existing HTML page.
//!
//! The page provides the elements (`#searchBtn`, `#searchInput`, `#results`,
//! `#loading`, `#error`, `#suggest`, `.error-empty`, `#all`, `#listing`,
//! `.prev`, `.next`, `.page`); this binary only wires events and renders into
//! them. The API base URL comes from `<html data-api-url="...">` when present.

#![cfg_attr(target_arch = "wasm32", no_main)]

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use std::{cell::RefCell, rc::Rc, time::Duration};
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::{closure::Closure, JsCast};
        use wasm_bindgen_futures::spawn_local;
        use web_sys::{Document, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent};

        use haveit::{
            api::{ApiClient, NavigatorOnline},
            constants::{api, app},
            listing::{ListingController, ListingRequest},
            platform,
            search::SearchController,
            surface::{Card, Element, RenderTarget},
        };

        type Client = ApiClient<NavigatorOnline>;

        // ---------------------------
        // Render target over the page contract
        // ---------------------------

        struct DomTarget {
            doc: Document,
        }

        impl DomTarget {
            fn selector(el: Element) -> &'static str {
                match el {
                    Element::Loading => "#loading",
                    Element::ErrorBanner => "#error",
                    Element::ErrorMessage => "#error p",
                    Element::SuggestButton => "#suggest",
                    Element::EmptyInputNotice => ".error-empty",
                    Element::InputShake => "#searchInput",
                    Element::SearchResults => "#results",
                    Element::Listing => "#all",
                    Element::ListingLabel => "#listing",
                    Element::PrevButtons => ".prev",
                    Element::NextButtons => ".next",
                    Element::PageFields => ".page",
                }
            }

            /// CSS display value used when an element is shown.
            fn shown_display(el: Element) -> &'static str {
                match el {
                    Element::Loading | Element::ErrorBanner => "flex",
                    Element::SuggestButton => "inline-block",
                    _ => "block",
                }
            }

            fn all(&self, el: Element) -> Vec<web_sys::Element> {
                let Ok(list) = self.doc.query_selector_all(Self::selector(el)) else {
                    return Vec::new();
                };
                (0..list.length())
                    .filter_map(|i| list.item(i))
                    .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
                    .collect()
            }

            fn card_node(&self, card: &Card) -> Result<web_sys::Element, JsValue> {
                let a = self.doc.create_element("a")?;
                a.set_attribute("href", &card.href)?;
                a.set_class_name("result-card");
                if card.new_tab {
                    a.set_attribute("target", "_blank")?;
                }

                let heading = self.doc.create_element("h3")?;
                heading.set_text_content(Some(&card.title));
                a.append_child(&heading)?;

                let body = self.doc.create_element("p")?;
                body.set_text_content(Some(&card.body));
                a.append_child(&body)?;
                Ok(a)
            }
        }

        impl RenderTarget for DomTarget {
            fn set_visible(&mut self, el: Element, visible: bool) {
                for node in self.all(el) {
                    if el == Element::InputShake {
                        let classes = node.class_list();
                        let _ = if visible { classes.add_1("error") } else { classes.remove_1("error") };
                    } else if let Some(html) = node.dyn_ref::<HtmlElement>() {
                        let display = if visible { Self::shown_display(el) } else { "none" };
                        let _ = html.style().set_property("display", display);
                    }
                }
            }

            fn set_text(&mut self, el: Element, text: &str) {
                for node in self.all(el) {
                    match node.dyn_ref::<HtmlInputElement>() {
                        Some(input) => input.set_value(text),
                        None => node.set_text_content(Some(text)),
                    }
                }
            }

            fn set_cards(&mut self, el: Element, cards: Vec<Card>) {
                for container in self.all(el) {
                    container.set_inner_html("");
                    for card in &cards {
                        match self.card_node(card) {
                            Ok(node) => {
                                let _ = container.append_child(&node);
                            }
                            Err(e) => log::warn!("[dom] card render failed: {e:?}"),
                        }
                    }
                }
            }

            fn set_disabled(&mut self, el: Element, disabled: bool) {
                for node in self.all(el) {
                    let _ = node.class_list().toggle_with_force("disabled", disabled);
                }
            }

            fn is_disabled(&self, el: Element) -> bool {
                self.all(el).iter().any(|n| n.class_list().contains("disabled"))
            }
        }

        // ---------------------------
        // Page state
        // ---------------------------

        struct Page {
            target: DomTarget,
            search: SearchController,
            listing: ListingController,
        }

        type Shared = Rc<RefCell<Page>>;

        fn input_value(doc: &Document) -> String {
            doc.get_element_by_id("searchInput")
                .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default()
        }

        fn debounce_search(page: &Shared, client: &Rc<Client>) {
            let ticket = {
                let mut guard = page.borrow_mut();
                let p = &mut *guard;
                let raw = input_value(&p.target.doc);
                p.search.trigger(&raw, &mut p.target)
            };
            let Some(ticket) = ticket else { return };

            let page = Rc::clone(page);
            let client = Rc::clone(client);
            spawn_local(async move {
                platform::sleep(Duration::from_millis(app::DEBOUNCE_MS)).await;
                let endpoint = {
                    let mut guard = page.borrow_mut();
                    let p = &mut *guard;
                    p.search.fire(&ticket, &mut p.target)
                };
                let Some(endpoint) = endpoint else { return };

                let response = client.get(&endpoint).await;
                let mut guard = page.borrow_mut();
                let p = &mut *guard;
                p.search.complete(ticket.id, response, &mut p.target);
            });
        }

        fn run_listing(page: &Shared, client: &Rc<Client>, req: Option<ListingRequest>) {
            let Some(req) = req else { return };
            let page = Rc::clone(page);
            let client = Rc::clone(client);
            spawn_local(async move {
                let response = client.get(req.endpoint()).await;
                let mut guard = page.borrow_mut();
                let p = &mut *guard;
                p.listing.complete(&req, response, &mut p.target);
            });
        }

        // ---------------------------
        // Event wiring
        // ---------------------------

        fn listen(target: &EventTarget, event: &str, f: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
            let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(f));
            target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
            cb.forget();
            Ok(())
        }

        fn listen_all(doc: &Document, selector: &str, event: &str, f: impl Fn() + Clone + 'static) -> Result<(), JsValue> {
            let list = doc.query_selector_all(selector)?;
            for i in 0..list.length() {
                if let Some(node) = list.item(i) {
                    let f = f.clone();
                    listen(&node, event, move |_| f())?;
                }
            }
            Ok(())
        }

        fn install_search_listeners(doc: &Document, page: &Shared, client: &Rc<Client>) -> Result<(), JsValue> {
            let (Some(button), Some(input)) = (doc.get_element_by_id("searchBtn"), doc.get_element_by_id("searchInput")) else {
                log::debug!("[dom] no search box on this page");
                return Ok(());
            };

            {
                let (page, client) = (Rc::clone(page), Rc::clone(client));
                listen(&button, "click", move |_| debounce_search(&page, &client))?;
            }
            {
                let (page, client) = (Rc::clone(page), Rc::clone(client));
                listen(&input, "keydown", move |e| {
                    if e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Enter") {
                        debounce_search(&page, &client);
                    }
                })?;
            }
            {
                let page = Rc::clone(page);
                listen(&input, "animationend", move |_| {
                    let mut guard = page.borrow_mut();
                    let p = &mut *guard;
                    p.search.animation_ended(&mut p.target);
                })?;
            }
            {
                let page = Rc::clone(page);
                listen(&input, "input", move |_| {
                    let mut guard = page.borrow_mut();
                    let p = &mut *guard;
                    p.search.input_changed(&mut p.target);
                })?;
            }
            Ok(())
        }

        fn install_listing_listeners(doc: &Document, page: &Shared, client: &Rc<Client>) -> Result<(), JsValue> {
            {
                let (page, client) = (Rc::clone(page), Rc::clone(client));
                listen_all(doc, ".prev", "click", move || {
                    let req = {
                        let mut guard = page.borrow_mut();
                        let p = &mut *guard;
                        p.listing.previous(&p.target)
                    };
                    run_listing(&page, &client, req);
                })?;
            }
            {
                let (page, client) = (Rc::clone(page), Rc::clone(client));
                listen_all(doc, ".next", "click", move || {
                    let req = {
                        let mut guard = page.borrow_mut();
                        let p = &mut *guard;
                        p.listing.next(&p.target)
                    };
                    run_listing(&page, &client, req);
                })?;
            }
            Ok(())
        }

        /// WASM entry point
        #[wasm_bindgen(start)]
        pub fn main() -> Result<(), JsValue> {
            platform::init_logging(log::Level::Info);

            let doc = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("no document"))?;

            let base_url = doc
                .document_element()
                .and_then(|root| root.get_attribute("data-api-url"))
                .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());
            log::info!("[dom] catalog API at {base_url}");

            let client = ApiClient::new(&base_url, api::DEFAULT_TIMEOUT_MS, NavigatorOnline)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let client = Rc::new(client);

            let page: Shared = Rc::new(RefCell::new(Page {
                target: DomTarget { doc: doc.clone() },
                search: SearchController::new(),
                listing: ListingController::new(None),
            }));

            install_search_listeners(&doc, &page, &client)?;

            if doc.get_element_by_id("all").is_some() {
                install_listing_listeners(&doc, &page, &client)?;
                let req = page.borrow_mut().listing.init();
                run_listing(&page, &client, Some(req));
            }
            Ok(())
        }
    } else {
        // Native builds: just provide a stub main so `cargo build --all-features` doesn't explode.
        fn main() {
            eprintln!("haveit-web-dom is only supported on wasm32 (browser) target.");
        }
    }
}
