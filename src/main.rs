//! PRAYAN'26 entry point
//!
//! Mounts the splash, swaps to the main site once it completes and wires the
//! scroll-driven sections.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, PageTransitionEvent, Window};

    use prayan_site::SiteConfig;
    use prayan_site::content::*;
    use prayan_site::error::{Result, SiteError};
    use prayan_site::page::{PageState, handle_registration_submit};
    use prayan_site::platform::browser::{BrowserTimers, FrameLoop, Listener};
    use prayan_site::renderer::CanvasRenderer;
    use prayan_site::reveal::{self, Glyph, RevealFlag, ScrollRevealController};
    use prayan_site::scroll::{self, EVENT_CARD_ENTRANCE, Layer};
    use prayan_site::splash::{ParticleField, Stage, StageSequencer};

    fn by_id(document: &Document, id: &str) -> Result<Element> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| SiteError::MissingElement(id.to_string()))
    }

    fn set_css(el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    fn viewport(window: &Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }


    fn apply_stage(document: &Document, stage: Stage) {
        let style = stage.style();

        if let Some(root) = document.get_element_by_id("splash") {
            let _ = root.set_attribute("data-stage", stage.as_str());
            set_css(&root, "opacity", &style.backdrop_opacity.to_string());
        }
        if let Some(emblem) = document.get_element_by_id("splash-emblem") {
            set_css(&emblem, "transform", &format!("scale({})", style.emblem_scale));
            set_css(&emblem, "opacity", &style.emblem_opacity.to_string());
        }
        if let Some(title) = document.get_element_by_id("splash-title") {
            set_css(&title, "opacity", &style.title_opacity.to_string());
            set_css(
                &title,
                "transform",
                &format!("translateY({}px)", style.title_offset_px),
            );
        }
        if let Some(glow) = document.get_element_by_id("splash-glow") {
            set_hidden(&glow, !style.forge_glow);
        }
    }

    /// Everything the splash registers with the browser
    struct Splash {
        field: Rc<RefCell<ParticleField>>,
        frame: Option<FrameLoop>,
        resize: Option<Listener>,
        sequencer: StageSequencer<BrowserTimers>,
    }

    impl Splash {
        fn mount(
            window: &Window,
            document: &Document,
            config: &SiteConfig,
            on_complete: impl FnOnce() + 'static,
        ) -> Self {
            let seed = js_sys::Date::now() as u64;
            let field = Rc::new(RefCell::new(ParticleField::new(
                Pcg32::seed_from_u64(seed),
                config.particles,
            )));

            let mut splash = Self {
                field,
                frame: None,
                resize: None,
                sequencer: StageSequencer::new(BrowserTimers::new(window.clone()), config.timing),
            };

            let count = config.effective_particle_count();
            if count == 0 {
                log::info!("Reduced motion: splash particles off");
            } else {
                match splash.start_particles(window, document, count) {
                    Ok(()) => log::info!("Splash particles running (seed {})", seed),
                    // No canvas means a static backdrop, not a broken page
                    Err(e) => log::warn!("Splash particles disabled: {}", e),
                }
            }

            fill_text(
                document,
                &[
                    ("splash-name", FEST_NAME),
                    ("splash-motto", SPLASH_MOTTO),
                    ("splash-tagline", SPLASH_TAGLINE),
                ],
            );
            apply_stage(document, Stage::Intro);
            let doc = document.clone();
            splash.sequencer.on_stage(move |stage| apply_stage(&doc, stage));
            splash.sequencer.start(on_complete);

            splash
        }

        fn start_particles(&mut self, window: &Window, document: &Document, count: usize) -> Result<()> {
            let canvas: HtmlCanvasElement = by_id(document, "splash-canvas")?
                .dyn_into()
                .map_err(|_| SiteError::WrongElement("splash-canvas".into(), "canvas"))?;
            let renderer = Rc::new(CanvasRenderer::new(canvas)?);

            let (w, h) = viewport(window);
            renderer.resize(w as u32, h as u32);
            self.field.borrow_mut().initialize(w, h, count)?;

            let resize = {
                let field = self.field.clone();
                let renderer = renderer.clone();
                let win = window.clone();
                Listener::add(window.as_ref(), "resize", move |_| {
                    let (w, h) = viewport(&win);
                    renderer.resize(w as u32, h as u32);
                    field.borrow_mut().resize(w, h);
                })?
            };

            let field = self.field.clone();
            let frame = FrameLoop::start(window, move |_time| {
                let mut field = field.borrow_mut();
                field.step();
                renderer.draw(&*field);
            });

            self.resize = Some(resize);
            self.frame = Some(frame);
            Ok(())
        }

        /// Release every splash registration. Safe to call repeatedly.
        fn teardown(&mut self) {
            if let Some(frame) = self.frame.take() {
                frame.cancel();
            }
            if let Some(mut resize) = self.resize.take() {
                resize.remove();
            }
            self.field.borrow_mut().teardown();
            self.sequencer.cancel();
        }
    }


    fn render_glyphs(document: &Document, container: &Element, glyphs: &[Glyph], class: &str) -> Result<()> {
        container.set_inner_html("");
        for glyph in glyphs {
            let span = document.create_element("span")?;
            span.set_class_name(class);
            span.set_text_content(Some(&glyph.text));
            match glyph.delay_s {
                Some(delay) => {
                    set_css(&span, "animation-delay", &format!("{:.3}s", delay));
                    set_css(&span, "animation-play-state", "running");
                }
                None => set_css(&span, "animation-play-state", "paused"),
            }
            container.append_child(&span)?;
        }
        Ok(())
    }

    fn render_realm(document: &Document, flag: RevealFlag) -> Result<()> {
        let title = by_id(document, "realm-title")?;
        render_glyphs(document, &title, &reveal::letters(REALM_TITLE, flag), "frozen-letter")?;

        let body = by_id(document, "realm-body")?;
        render_glyphs(document, &body, &reveal::words(REALM_BODY, flag), "frozen-word")?;

        let divider = reveal::divider(flag);
        let line = by_id(document, "realm-divider")?;
        set_css(&line, "width", &format!("{}px", divider.width_px));
        set_css(
            &line,
            "transition",
            &format!(
                "width {}s cubic-bezier(0.22, 1, 0.36, 1) {}s",
                divider.duration_s, divider.delay_s
            ),
        );

        let motes = by_id(document, "realm-motes")?;
        motes.set_inner_html("");
        for mote in reveal::ice_motes(flag) {
            let el = document.create_element("div")?;
            el.set_class_name("ice-particle");
            set_css(&el, "left", &format!("{}%", mote.left_pct));
            set_css(&el, "top", &format!("{}%", mote.top_pct));
            set_css(&el, "width", &format!("{}px", mote.size_px));
            set_css(&el, "height", &format!("{}px", mote.size_px));
            set_css(&el, "animation-delay", &format!("{:.2}s", mote.delay_s));
            set_css(&el, "animation-duration", &format!("{:.2}s", mote.duration_s));
            motes.append_child(&el)?;
        }

        let section = by_id(document, "realm")?;
        let _ = section
            .class_list()
            .toggle_with_force("revealed", flag.is_revealed());
        Ok(())
    }

    fn render_events(document: &Document) -> Result<()> {
        let grid = by_id(document, "events-grid")?;
        grid.set_inner_html("");
        for event in EVENTS.iter() {
            let card = document.create_element("div")?;
            card.set_class_name("herald-card");
            set_css(&card, "opacity", "0");
            set_css(
                &card,
                "transform",
                &format!("translateY({}px)", EVENT_CARD_ENTRANCE.offset_y_px),
            );

            let icon = document.create_element("div")?;
            icon.set_class_name("herald-shield");
            icon.set_text_content(Some(event.icon));
            let name = document.create_element("h3")?;
            name.set_text_content(Some(event.name));
            let desc = document.create_element("p")?;
            desc.set_text_content(Some(event.description));
            let button = document.create_element("button")?;
            button.set_class_name("herald-btn");
            button.set_text_content(Some("⚜ Enter Lists ⚜"));

            for child in [&icon, &name, &desc, &button] {
                card.append_child(child)?;
            }
            grid.append_child(&card)?;
        }
        Ok(())
    }

    fn reveal_events(document: &Document) -> Result<()> {
        let cards = document.query_selector_all(".herald-card")?;
        for i in 0..cards.length() {
            let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            set_css(&card, "transition", &EVENT_CARD_ENTRANCE.transition(i as usize));
            set_css(&card, "transform", "translateY(0px)");
            set_css(&card, "opacity", "1");
        }
        Ok(())
    }

    fn fill_text(document: &Document, copy: &[(&str, &str)]) {
        for &(id, text) in copy {
            match document.get_element_by_id(id) {
                Some(el) => el.set_text_content(Some(text)),
                None => log::warn!("No #{} for copy", id),
            }
        }
    }

    fn render_static(document: &Document) -> Result<()> {
        fill_text(
            document,
            &[
                ("hero-name", FEST_NAME),
                ("hero-subtitle", HERO_SUBTITLE),
                ("hero-quote", HERO_QUOTE),
                ("register-pitch", REGISTER_PITCH),
                ("register-button", REGISTER_BUTTON),
                ("footer-name", FEST_NAME),
                ("footer-copyright", FOOTER_COPYRIGHT),
                ("footer-motto", FOOTER_MOTTO),
            ],
        );

        let sponsors = by_id(document, "sponsors-grid")?;
        sponsors.set_inner_html("");
        for sponsor in SPONSORS {
            let tile = document.create_element("div")?;
            tile.set_class_name("sponsor-tile");
            tile.set_text_content(Some(sponsor));
            sponsors.append_child(&tile)?;
        }

        let fields = by_id(document, "register-fields")?;
        fields.set_inner_html("");
        for field in REGISTRATION_FIELDS {
            let input = document.create_element("input")?;
            input.set_attribute("type", field.kind)?;
            input.set_attribute("placeholder", field.placeholder)?;
            fields.append_child(&input)?;
        }
        Ok(())
    }

    fn apply_layer(document: &Document, id: &str, layer: Layer) {
        if let Some(el) = document.get_element_by_id(id) {
            set_css(&el, "opacity", &format!("{:.4}", layer.opacity));
            set_css(&el, "transform", &layer.transform());
        }
    }

    /// Reveal state for the scroll-triggered sections
    struct Sections {
        realm: ScrollRevealController,
        events: ScrollRevealController,
    }

    impl Sections {
        fn detach(&mut self) {
            self.realm.detach();
            self.events.detach();
        }
    }

    fn on_scroll(window: &Window, document: &Document, sections: &mut Sections) {
        let (_, vh) = viewport(window);
        let now = js_sys::Date::now();

        if let Some(hero) = document.get_element_by_id("hero") {
            let rect = hero.get_bounding_client_rect();
            let (fire, ice) = scroll::backdrops(rect.top() as f32, rect.height() as f32);
            apply_layer(document, "fire-bg", fire);
            apply_layer(document, "ice-bg", ice);
        }

        if let Some(realm) = document.get_element_by_id("realm") {
            let top = realm.get_bounding_client_rect().top() as f32;
            if sections.realm.observe(top, vh, now) {
                if let Err(e) = render_realm(document, sections.realm.flag()) {
                    log::warn!("Realm reveal skipped: {}", e);
                }
            }
        }

        if let Some(events) = document.get_element_by_id("events") {
            let top = events.get_bounding_client_rect().top() as f32;
            if sections.events.observe(top, vh, now) {
                if let Err(e) = reveal_events(document) {
                    log::warn!("Event cards reveal skipped: {}", e);
                }
            }
        }
    }

    struct MainSite {
        sections: Rc<RefCell<Sections>>,
        listeners: Vec<Listener>,
    }

    impl MainSite {
        fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Self> {
            render_realm(document, RevealFlag::Hidden)?;
            render_events(document)?;
            render_static(document)?;

            let sections = Rc::new(RefCell::new(Sections {
                realm: ScrollRevealController::attach(config.reveal_threshold)?,
                events: ScrollRevealController::attach(config.reveal_threshold)?,
            }));

            let mut listeners = Vec::new();
            for kind in ["scroll", "resize"] {
                let window_ref = window.clone();
                let document = document.clone();
                let sections = sections.clone();
                listeners.push(Listener::add(window.as_ref(), kind, move |_| {
                    on_scroll(&window_ref, &document, &mut sections.borrow_mut());
                })?);
            }

            let form = by_id(document, "register-form")?;
            listeners.push(Listener::add(form.as_ref(), "submit", |event| {
                event.prevent_default();
                handle_registration_submit();
            })?);

            // The page may already be scrolled (reload, anchor link)
            on_scroll(window, document, &mut sections.borrow_mut());

            Ok(Self { sections, listeners })
        }

        fn unmount(&mut self) {
            for mut listener in self.listeners.drain(..) {
                listener.remove();
            }
            self.sections.borrow_mut().detach();
        }
    }


    struct App {
        window: Window,
        document: Document,
        config: SiteConfig,
        page: PageState,
        splash: Option<Splash>,
        main: Option<MainSite>,
    }

    impl App {
        fn show_main(&mut self) {
            if !self.page.splash_complete() {
                return;
            }
            if let Some(mut splash) = self.splash.take() {
                splash.teardown();
            }

            if let Some(el) = self.document.get_element_by_id("splash") {
                set_hidden(&el, true);
            }
            if let Some(el) = self.document.get_element_by_id("main") {
                set_hidden(&el, false);
            }

            match MainSite::mount(&self.window, &self.document, &self.config) {
                Ok(main) => self.main = Some(main),
                Err(e) => log::error!("Main site wiring failed, content stays static: {}", e),
            }
        }

        fn page_hidden(&mut self, persisted: bool) {
            if !self.page.page_hidden(persisted) {
                return;
            }
            log::info!("Page unloading, releasing animations");
            self.teardown();
        }

        fn teardown(&mut self) {
            if let Some(mut splash) = self.splash.take() {
                splash.teardown();
            }
            if let Some(mut main) = self.main.take() {
                main.unmount();
            }
        }
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("PRAYAN'26 starting...");

        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;
        let config = SiteConfig::load();

        let app = Rc::new(RefCell::new(App {
            window: window.clone(),
            document: document.clone(),
            config: config.clone(),
            page: PageState::new(),
            splash: None,
            main: None,
        }));

        let on_complete = {
            let app = app.clone();
            move || app.borrow_mut().show_main()
        };
        let splash = Splash::mount(&window, &document, &config, on_complete);
        app.borrow_mut().splash = Some(splash);

        // Navigating away is the other exit path
        let pagehide = {
            let app = app.clone();
            Listener::add(window.as_ref(), "pagehide", move |event| {
                let persisted = event
                    .dyn_ref::<PageTransitionEvent>()
                    .is_some_and(|e| e.persisted());
                app.borrow_mut().page_hidden(persisted);
            })?
        };
        std::mem::forget(pagehide);

        log::info!("PRAYAN'26 running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_site::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("PRAYAN'26 (native) starting...");
    log::info!("The site runs in the browser - use `trunk serve`. Simulating the splash instead.");

    simulate_splash();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run the splash timeline on a virtual 60 Hz clock and report what happened
#[cfg(not(target_arch = "wasm32"))]
fn simulate_splash() {
    use std::cell::Cell;
    use std::rc::Rc;

    use prayan_site::SiteConfig;
    use prayan_site::platform::VirtualClock;
    use prayan_site::splash::{ParticleField, StageSequencer};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: u64 = 16;

    let config = SiteConfig::load();
    let clock = VirtualClock::new();

    let mut field = ParticleField::new(Pcg32::seed_from_u64(2026), config.particles);
    if let Err(e) = field.initialize(1280.0, 720.0, config.effective_particle_count()) {
        log::warn!("Particles disabled: {}", e);
    }

    let mut sequencer = StageSequencer::new(clock.clone(), config.timing);
    let stage_clock = clock.clone();
    sequencer.on_stage(move |stage| {
        log::info!("{:>5} ms  stage -> {}", stage_clock.now_ms(), stage.as_str());
    });

    let done_at = Rc::new(Cell::new(None));
    let done = done_at.clone();
    let done_clock = clock.clone();
    sequencer.start(move || done.set(Some(done_clock.now_ms())));

    let mut frames = 0u32;
    while done_at.get().is_none() {
        field.step();
        clock.advance(FRAME_MS);
        frames += 1;
    }

    field.teardown();
    sequencer.cancel();

    println!(
        "\nSplash complete at {} ms after {} frames ({} particles alive)",
        done_at.get().unwrap_or_default(),
        frames,
        field.len()
    );
}
