//! Demo application state.

use edgescroll::{
    Config, Direction, EdgeScrollTrigger, Effect, Msg, ScrollBinding, ScrollSample, Token, log,
};

use crate::services::{FetchRequest, Page};

pub struct App {
    pub config: Config,
    /// Loaded items, top to bottom
    pub items: Vec<String>,
    /// Index of the first visible row
    pub scroll: usize,
    /// Rows visible in the list area
    pub viewport: usize,
    pub trigger: EdgeScrollTrigger<FetchRequest>,
    binding: ScrollBinding<Msg>,
    /// Page the next delivered page must carry to be applied
    next_page: u32,
    /// Number of timeouts that reset the trigger
    pub timeouts: u32,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let trigger = config
            .trigger
            .apply(EdgeScrollTrigger::new(|direction| FetchRequest { direction, page: 1 }));

        Self {
            config,
            items: Vec::new(),
            scroll: 0,
            viewport: 0,
            trigger,
            binding: ScrollBinding::new(|msg| msg),
            next_page: 0,
            timeouts: 0,
            should_quit: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.trigger.direction()
    }

    /// Block the trigger and return the request for the first page.
    pub fn initial_request(&mut self) -> FetchRequest {
        self.trigger.start_loading();
        FetchRequest {
            direction: self.direction(),
            page: 0,
        }
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> usize {
        self.items.len().saturating_sub(self.viewport)
    }

    /// Move the view by `delta` rows, clamped to the content.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn scroll_sample(&self) -> ScrollSample {
        ScrollSample::new(
            self.scroll as f64,
            self.items.len() as u64,
            self.viewport as u64,
        )
    }

    /// Report the current geometry through the scroll binding, as a UI
    /// layer would on a scroll event.
    pub fn report_scroll(&self) -> Msg {
        let dispatch = self.binding.dispatch(self.scroll_sample().to_payload());
        if !dispatch.stop_propagation {
            log::log_event("scroll event propagates to other listeners");
        }
        dispatch.message
    }

    /// Feed a trigger message and collect the effects to run.
    pub fn handle_trigger(&mut self, msg: Msg) -> Vec<Effect<FetchRequest>> {
        let timeout = matches!(msg, Msg::TimeoutFired(_));
        let was_loading = self.trigger.is_loading();

        let effects = self.trigger.update(msg);

        if timeout && was_loading && !self.trigger.is_loading() {
            self.timeouts += 1;
        }
        effects
    }

    /// Insert a delivered page and re-arm the trigger.
    ///
    /// Returns `false` for pages that are no longer expected, such as a late
    /// reply to a request whose page has already been delivered.
    pub fn apply_page(&mut self, page: Page) -> bool {
        if page.request.page != self.next_page {
            log::log(&format!(
                "Discarding page {} (expected {})",
                page.request.page, self.next_page
            ));
            return false;
        }

        let added = page.items.len();
        match page.request.direction {
            Direction::Bottom => self.items.extend(page.items),
            Direction::Top => {
                self.items.splice(0..0, page.items);
                // Keep the rows the user was looking at in place
                if self.scroll > 0 || self.items.len() > added {
                    self.scroll += added;
                } else {
                    self.scroll = self.max_scroll();
                }
            }
        }
        self.scroll = self.scroll.min(self.max_scroll());

        self.next_page += 1;
        let next = self.next_page;
        self.trigger
            .change_load_more(move |direction| FetchRequest { direction, page: next });
        self.trigger.stop_loading();

        log::log(&format!("Applied page {} ({} items)", page.request.page, added));
        true
    }

    pub fn last_request(&self) -> Option<Token> {
        self.trigger.last_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pages::items_for;
    use edgescroll::TriggerConfig;

    fn app(direction: Direction) -> App {
        let config = Config {
            trigger: TriggerConfig {
                direction,
                offset: 2,
                timeout_ms: 1000,
            },
            ..Default::default()
        };
        let mut app = App::new(config);
        app.set_viewport(10);
        app
    }

    fn page(direction: Direction, page: u32) -> Page {
        let request = FetchRequest { direction, page };
        Page {
            request,
            items: items_for(request, 20),
        }
    }

    #[test]
    fn test_initial_load_blocks_trigger() {
        let mut app = app(Direction::Bottom);
        let request = app.initial_request();
        assert_eq!(request.page, 0);
        assert!(app.trigger.is_loading());

        let msg = app.report_scroll();
        assert!(app.handle_trigger(msg).is_empty());

        assert!(app.apply_page(page(Direction::Bottom, 0)));
        assert!(!app.trigger.is_loading());
        assert_eq!(app.items.len(), 20);
    }

    #[test]
    fn test_scrolling_to_bottom_requests_next_page() {
        let mut app = app(Direction::Bottom);
        app.initial_request();
        app.apply_page(page(Direction::Bottom, 0));

        app.scroll_by(5);
        let msg = app.report_scroll();
        assert!(app.handle_trigger(msg).is_empty());

        app.scroll_to_bottom();
        assert_eq!(app.scroll, 10);
        let msg = app.report_scroll();
        assert_eq!(app.handle_trigger(msg), vec![Effect::RequestTime]);

        let effects = app.handle_trigger(Msg::TimeResolved(Token(1)));
        assert_eq!(
            effects[0],
            Effect::LoadMore(FetchRequest { direction: Direction::Bottom, page: 1 })
        );
    }

    #[test]
    fn test_top_pages_keep_view_in_place() {
        let mut app = app(Direction::Top);
        app.initial_request();
        app.apply_page(page(Direction::Top, 0));
        // First page starts scrolled to the newest item at the bottom
        assert_eq!(app.scroll, 10);
        assert_eq!(app.items.last().map(String::as_str), Some("Message     1"));

        app.scroll_to_top();
        app.trigger.start_loading();
        app.apply_page(page(Direction::Top, 1));
        assert_eq!(app.scroll, 20);
        assert_eq!(app.items[20], "Message    20");
    }

    #[test]
    fn test_late_page_is_discarded() {
        let mut app = app(Direction::Bottom);
        app.initial_request();
        assert!(app.apply_page(page(Direction::Bottom, 0)));
        assert!(!app.apply_page(page(Direction::Bottom, 0)));
        assert_eq!(app.items.len(), 20);
    }

    #[test]
    fn test_timeout_counter() {
        let mut app = app(Direction::Bottom);
        app.initial_request();
        app.apply_page(page(Direction::Bottom, 0));
        app.scroll_to_bottom();

        let msg = app.report_scroll();
        app.handle_trigger(msg);
        app.handle_trigger(Msg::TimeResolved(Token(3)));
        app.handle_trigger(Msg::TimeoutFired(Token(3)));
        assert_eq!(app.timeouts, 1);
        assert!(!app.trigger.is_loading());

        // A second firing of the same timer changes nothing
        app.handle_trigger(Msg::TimeoutFired(Token(3)));
        assert_eq!(app.timeouts, 1);
    }
}
