use seed::{prelude::*, virtual_dom::AtValue, *};
use shared::{
    ChatLog, ChatMessage, Coordinate, GuideRequest, GuideResponse, PromptStyle, Role,
    TourSelection, TourStop,
    locate::LOCATION_POLL_INTERVAL_MS,
    tour::{TOUR_DATE_LABEL, TOUR_SLOT_LABEL, WINTER_TIPS},
};
use wasm_bindgen::{JsCast, closure::Closure, prelude::wasm_bindgen};
use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api/guide".to_string()
}

pub struct Model {
    selection: TourSelection<'static>,
    test_mode: bool,
    user_location: Option<Coordinate>,
    chat: ChatLog,
    input: String,
    panel_open: bool,
    location_error: Option<String>,
}

impl Model {
    fn new() -> Self {
        Self {
            selection: TourSelection::acropolis(),
            test_mode: false,
            user_location: None,
            chat: ChatLog::new(),
            input: String::new(),
            panel_open: false,
            location_error: None,
        }
    }

    /// Test mode pins the user to whichever card they tapped.
    fn wants_location(&self) -> bool {
        !self.test_mode
    }

    /// Returns true when leaving test mode, so the caller re-reads the
    /// position right away instead of waiting for the next poll.
    fn toggle_test_mode(&mut self) -> bool {
        self.test_mode = !self.test_mode;
        !self.test_mode
    }

    fn record_position(&mut self, coord: Coordinate) -> Option<usize> {
        self.user_location = Some(coord);
        self.location_error = None;
        self.selection.apply_sample(coord)
    }

    fn location_failed(&mut self, err: &str) {
        self.location_error = Some(err.to_string());
    }

    /// Blank input is left in the box and nothing is sent.
    fn take_question(&mut self) -> Option<GuideRequest> {
        let request = self
            .chat
            .submit(&self.input, self.selection.active(), PromptStyle::NameOnly)?;
        self.input.clear();
        self.panel_open = true;
        Some(request)
    }
}

pub enum Msg {
    RequestLocation,
    PositionSampled(Coordinate),
    LocationFailed(String),
    StopClicked(usize),
    ToggleTestMode,
    InputChanged(String),
    Send,
    GuideReplied(Result<GuideResponse, String>),
    TogglePanel,
    OpenPanel,
    ClosePanel,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::interval(LOCATION_POLL_INTERVAL_MS, || {
        Msg::RequestLocation
    }));
    orders.send_msg(Msg::RequestLocation);
    Model::new()
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::RequestLocation => {
            if !model.wants_location() {
                orders.skip();
                return;
            }
            request_location(orders);
        }
        Msg::PositionSampled(coord) => {
            if let Some(idx) = model.record_position(coord) {
                web_sys::console::debug_1(
                    &format!(
                        "[frontend] near {} at {:.5},{:.5}",
                        model.selection.stops()[idx].id,
                        coord.lat,
                        coord.lon
                    )
                    .into(),
                );
            }
        }
        Msg::LocationFailed(err) => {
            web_sys::console::warn_1(&format!("[frontend] geolocation error: {err}").into());
            model.location_failed(&err);
        }
        Msg::StopClicked(idx) => {
            model.selection.select(idx);
        }
        Msg::ToggleTestMode => {
            if model.toggle_test_mode() {
                orders.send_msg(Msg::RequestLocation);
            }
        }
        Msg::InputChanged(val) => model.input = val,
        Msg::Send => {
            if let Some(request) = model.take_question() {
                orders.perform_cmd(send_guide_request(request));
            }
        }
        Msg::GuideReplied(result) => {
            if let Err(err) = &result {
                web_sys::console::error_1(&format!("[frontend] guide error: {err}").into());
            }
            model.chat.receive(result);
        }
        Msg::TogglePanel => model.panel_open = !model.panel_open,
        Msg::OpenPanel => model.panel_open = true,
        Msg::ClosePanel => model.panel_open = false,
    }
}

fn request_location(orders: &mut impl Orders<Msg>) {
    let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok())
    else {
        web_sys::console::warn_1(&"[frontend] geolocation unavailable".into());
        return;
    };

    let on_position = {
        let sender = orders.msg_sender();
        Closure::once_into_js(move |position: GeolocationPosition| {
            let coords = position.coords();
            sender(Some(Msg::PositionSampled(Coordinate {
                lat: coords.latitude(),
                lon: coords.longitude(),
            })));
        })
    };
    let on_error = {
        let sender = orders.msg_sender();
        Closure::once_into_js(move |error: GeolocationPositionError| {
            sender(Some(Msg::LocationFailed(error.message())));
        })
    };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);

    if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
        on_position.unchecked_ref(),
        Some(on_error.unchecked_ref()),
        &options,
    ) {
        web_sys::console::warn_1(&format!("[frontend] getCurrentPosition: {err:?}").into());
    }
}

async fn send_guide_request(payload: GuideRequest) -> Msg {
    web_sys::console::debug_1(
        &format!(
            "[frontend] asking guide ({} chars) near {:?}",
            payload.prompt.chars().count(),
            payload.location
        )
        .into(),
    );
    let response = match Request::new(api_root()).method(Method::Post).json(&payload) {
        Err(err) => Err(format!("{err:?}")),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(format!("{err:?}")),
            Ok(raw) => match raw.check_status() {
                Err(status_err) => Err(format!("{status_err:?}")),
                Ok(resp) => match resp.json::<GuideResponse>().await {
                    Ok(reply) => Ok(reply),
                    Err(err) => Err(format!("{err:?}")),
                },
            },
        },
    };

    Msg::GuideReplied(response)
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["app-container"],
        view_header(model),
        div![
            C!["tour"],
            view_path_header(model),
            if model.test_mode {
                div![
                    C!["test-mode-banner"],
                    strong!["Simulating Trip: "],
                    "Tap any site below to \"stand\" there virtually for the AI Guide.",
                ]
            } else {
                empty![]
            },
            div![
                C!["tour-path"],
                model
                    .selection
                    .stops()
                    .iter()
                    .enumerate()
                    .map(|(idx, stop)| view_stop(
                        idx,
                        stop,
                        idx == model.selection.active_index()
                    )),
            ],
            view_tips(),
        ],
        view_guide_panel(model),
    ]
}

fn view_header(model: &Model) -> Node<Msg> {
    div![
        C!["app-header"],
        h1!["Acropolis Guide"],
        button![
            C!["test-toggle", IF!(model.test_mode => "active")],
            if model.test_mode {
                "Test mode on"
            } else {
                "Test mode"
            },
            ev(Ev::Click, |_| Msg::ToggleTestMode),
        ],
    ]
}

fn view_path_header(model: &Model) -> Node<Msg> {
    div![
        C!["path-header"],
        div![
            h2!["Tour Path"],
            span![C!["slot"], TOUR_SLOT_LABEL],
            span![C!["date"], TOUR_DATE_LABEL],
            small![
                C!["location"],
                location_label(model.user_location, model.location_error.as_deref())
            ],
        ],
        button![
            C!["locate-btn"],
            "Locate me",
            attrs! { At::Disabled => bool_attr(model.test_mode) },
            ev(Ev::Click, |_| Msg::RequestLocation),
        ],
    ]
}

fn view_stop(idx: usize, stop: &TourStop, active: bool) -> Node<Msg> {
    div![
        C!["tour-card", IF!(active => "active")],
        span![C!["time"], stop.time],
        h3![stop.title],
        p![stop.description],
        ev(Ev::Click, move |_| Msg::StopClicked(idx)),
    ]
}

fn view_tips() -> Node<Msg> {
    div![
        C!["tips"],
        h3!["Winter Morning Tips"],
        ul![WINTER_TIPS.iter().map(|tip| li![*tip])],
    ]
}

fn view_guide_panel(model: &Model) -> Node<Msg> {
    let body = if model.panel_open {
        div![
            C!["chat"],
            div![
                C!["chat-header"],
                h3!["Guide Chat"],
                button!["Close", ev(Ev::Click, |_| Msg::ClosePanel)],
            ],
            if model.chat.messages().is_empty() {
                p![C!["suggestion"], "\"What are the best angles for a photo here?\""]
            } else {
                empty![]
            },
            model.chat.messages().iter().map(view_message),
            if model.chat.is_waiting() {
                div![C!["typing"], "Guide is thinking..."]
            } else {
                empty![]
            },
        ]
    } else {
        div![
            C!["teaser"],
            h4!["Ask your Guide"],
            p![format!("Now at: {}", model.selection.active().title)],
        ]
    };

    div![
        C!["guide-panel", IF!(model.panel_open => "open")],
        IF!(model.panel_open => div![C!["backdrop"], ev(Ev::Click, |_| Msg::ClosePanel)]),
        div![C!["handle"], ev(Ev::Click, |_| Msg::TogglePanel)],
        body,
        div![
            C!["chat-input"],
            input![
                attrs! {
                    At::Value => model.input.as_str(),
                    At::Placeholder => "Message the Guide...",
                    At::AutoComplete => "off",
                },
                input_ev(Ev::Input, Msg::InputChanged),
                keyboard_ev(Ev::KeyDown, |event| IF!(event.key() == "Enter" => Msg::Send)),
                ev(Ev::Focus, |_| Msg::OpenPanel),
            ],
            button!["Send", ev(Ev::Click, |_| Msg::Send)],
        ],
    ]
}

fn view_message(msg: &ChatMessage) -> Node<Msg> {
    let class = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    div![
        C!["message", class],
        p![&msg.text],
        msg.links.iter().map(|link| {
            a![
                C!["maps-link"],
                attrs! {
                    At::Href => link.uri.as_str(),
                    At::Target => "_blank",
                    At::Rel => "noopener noreferrer",
                },
                &link.title,
            ]
        }),
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

fn location_label(coord: Option<Coordinate>, error: Option<&str>) -> String {
    match (coord, error) {
        (_, Some(err)) => format!("Location unavailable: {err}"),
        (Some(c), None) => format!("You are at {:.5} / {:.5}", c.lat, c.lon),
        (None, None) => "Location unknown".to_string(),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
