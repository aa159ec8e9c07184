//! Median Map Simulator: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  clock  weather  speed  paused                                      │
//!   ├─── traffic ─────────────────────┬─── navigation ────────────────────┤
//!   │  roads, incident, POIs          │  destination, route steps         │
//!   ├─── pharmacy ────────────────────┴─── events ────────────────────────┤
//!   │  dashboard counts for a seeded batch │ recently fired events        │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The simulator never reads the clock itself; the event loop feeds it the
//! real time elapsed between frames, scaled by the speed setting.

use std::{
    collections::VecDeque,
    io,
    path::Path,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

use median_clinical::{
    formulary::Formulary,
    invariants::check_prescription_batch,
    pharmacy::generate_prescription_batch,
    seed::{Domain, SeedStreams},
    stats::calculate_pharmacy_stats,
};
use median_config::MedianConfig;
use median_contracts::{
    error::MedianResult,
    label::Labeled,
    prescription::{PharmacyStats, PrescriptionStatus},
    simulation::{MapPoint, Navigation, Road, SimulationState, TrafficDensity, Weather, MAP_EXTENT},
};
use median_sim::{geo::UnavailableLocator, navigation::total_distance_m, SimEvent, Simulator};

/// Speed multipliers cycled with `+` and `-`.
const SPEEDS: [u64; 5] = [1, 2, 4, 8, 16];

/// Lines kept in the event panel.
const EVENT_LOG_LEN: usize = 8;

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    sim: Simulator,
    paused: bool,
    speed_index: usize,

    /// Draws random route destinations; separate from the simulator's stream.
    destinations: StdRng,

    seed: u64,
    today: NaiveDate,
    formulary: Formulary,
    /// How many times `r` was pressed; offsets the batch seed.
    regenerations: u64,
    stats: PharmacyStats,
    batch_consistent: bool,

    events: VecDeque<String>,
}

impl App {
    fn new(config: MedianConfig) -> MedianResult<Self> {
        let seeds = SeedStreams::new(config.simulation.seed);
        let sim = Simulator::with_rng(
            config.simulation.clone(),
            seeds.rng(Domain::Map),
            &UnavailableLocator::new("terminal session has no position source"),
        )?;
        let destinations = StdRng::seed_from_u64(seeds.seed_for(Domain::Map).wrapping_add(1));

        let today = config
            .generator
            .today
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        let mut app = Self {
            sim,
            paused: false,
            speed_index: 0,
            destinations,
            seed: config.generator.seed,
            today,
            formulary: Formulary::standard(),
            regenerations: 0,
            stats: PharmacyStats::default(),
            batch_consistent: true,
            events: VecDeque::with_capacity(EVENT_LOG_LEN),
        };
        app.regenerate_batch(config.generator.prescription_count.get());
        Ok(app)
    }

    fn speed(&self) -> u64 {
        SPEEDS[self.speed_index]
    }

    /// Feed `elapsed` real time into the simulator.
    fn update(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }
        let simulated_ms = (elapsed.as_millis() as u64).saturating_mul(self.speed());
        let fired = self.sim.advance(simulated_ms);
        for event in fired {
            let line = describe_event(event, self.sim.state());
            self.log(line);
        }
    }

    fn log(&mut self, line: String) {
        if self.events.len() == EVENT_LOG_LEN {
            self.events.pop_front();
        }
        self.events.push_back(line);
    }

    fn faster(&mut self) {
        self.speed_index = (self.speed_index + 1).min(SPEEDS.len() - 1);
    }

    fn slower(&mut self) {
        self.speed_index = self.speed_index.saturating_sub(1);
    }

    fn request_random_route(&mut self) {
        let destination = MapPoint::new(
            self.destinations.gen_range(0.0..=MAP_EXTENT),
            self.destinations.gen_range(0.0..=MAP_EXTENT),
        );
        match self.sim.request_route(destination) {
            Ok(()) => self.log(format!("route requested to ({:.0}, {:.0})", destination.x, destination.y)),
            Err(e) => self.log(format!("route refused: {}", e)),
        }
    }

    fn cancel_route(&mut self) {
        self.sim.cancel_route();
        self.log("route cancelled".to_string());
    }

    fn regenerate_batch(&mut self, count: usize) {
        let seeds = SeedStreams::new(self.seed.wrapping_add(self.regenerations));
        let batch = generate_prescription_batch(&seeds, &self.formulary, count, self.today);
        self.stats = calculate_pharmacy_stats(&batch, self.today);
        self.batch_consistent = check_prescription_batch(&batch).passed;
        self.regenerations += 1;
    }

    /// Stop the simulator and hand back its final state.
    fn shutdown(self) -> SimulationState {
        self.sim.teardown()
    }
}

fn describe_event(event: SimEvent, state: &SimulationState) -> String {
    let clock = format!("{:02}:00", state.hour);
    match event {
        SimEvent::ClockTick => format!("{} tick, weather {}", clock, state.weather),
        SimEvent::PoiRoll => format!("{} poi roll ({} live)", clock, state.pois.len()),
        SimEvent::IncidentCleared => format!("{} incident cleared", clock),
        SimEvent::PoiExpired(id) => format!("{} poi #{} expired", clock, id),
        SimEvent::RouteReady => format!("{} route ready, {} step(s)", clock, state.navigation.steps().len()),
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Min(10),    // traffic + navigation
            Constraint::Length(12), // pharmacy + events
            Constraint::Length(3),  // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer_chunks[1]);
    render_traffic(f, mid_chunks[0], app);
    render_navigation(f, mid_chunks[1], app);

    let low_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer_chunks[2]);
    render_pharmacy(f, low_chunks[0], app);
    render_events(f, low_chunks[1], app);

    render_footer(f, outer_chunks[3], app);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn weather_color(weather: Weather) -> Color {
    match weather {
        Weather::Clear => Color::Yellow,
        Weather::Rain => Color::Blue,
        Weather::Fog => Color::Gray,
    }
}

fn density_color(density: TrafficDensity) -> Color {
    match density {
        TrafficDensity::Low => Color::Green,
        TrafficDensity::Moderate => Color::Yellow,
        TrafficDensity::Heavy => Color::LightRed,
        TrafficDensity::Blocked => Color::Red,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let state = app.sim.state();
    let title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Median Map    ", title_style),
        Span::styled(format!("{:02}:00  ", state.hour), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}  ", state.weather),
            Style::default().fg(weather_color(state.weather)),
        ),
        Span::raw(format!("speed x{}  ", app.speed())),
    ];
    if app.paused {
        spans.push(Span::styled("PAUSED", Style::default().fg(Color::Black).bg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans)).block(panel(""));
    f.render_widget(header, area);
}

fn render_traffic(f: &mut Frame, area: Rect, app: &App) {
    let state = app.sim.state();
    let mut items: Vec<ListItem> = Vec::new();

    for road in Road::ALL {
        let density = state.density(*road);
        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("  {:<6} road: ", road.label())),
            Span::styled(
                density.label(),
                Style::default().fg(density_color(density)).add_modifier(Modifier::BOLD),
            ),
        ])));
    }
    items.push(ListItem::new(""));

    let incident = match state.incident {
        Some(i) => Span::styled(
            format!("  Incident: {} on {} (clears in {}s)", i.kind, i.road, i.clears_at_ms.saturating_sub(state.now_ms) / 1000),
            Style::default().fg(Color::Red),
        ),
        None => Span::styled("  Incident: none", Style::default().fg(Color::DarkGray)),
    };
    items.push(ListItem::new(Line::from(incident)));
    items.push(ListItem::new(""));

    items.push(ListItem::new(format!("  Points of interest ({}):", state.pois.len())));
    for poi in &state.pois {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(
                "    #{:<3} {:<8} ({:>5.1}, {:>5.1})  {}s left",
                poi.id,
                poi.kind,
                poi.position.x,
                poi.position.y,
                poi.expires_at_ms.saturating_sub(state.now_ms) / 1000
            ),
            Style::default().fg(Color::Gray),
        ))));
    }

    f.render_widget(List::new(items).block(panel(" Traffic ")), area);
}

fn render_navigation(f: &mut Frame, area: Rect, app: &App) {
    let state = app.sim.state();
    let mut items: Vec<ListItem> = Vec::new();

    items.push(ListItem::new(format!(
        "  Start: ({:.4}, {:.4})",
        state.position.lat, state.position.lon
    )));
    items.push(ListItem::new(""));

    match &state.navigation {
        Navigation::Idle => {
            items.push(ListItem::new(Line::from(Span::styled(
                "  No destination. Press [n] to request a route.",
                Style::default().fg(Color::DarkGray),
            ))));
        }
        Navigation::Calculating { destination, .. } => {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("  Calculating route to ({:.0}, {:.0})...", destination.x, destination.y),
                Style::default().fg(Color::Yellow),
            ))));
        }
        Navigation::Routed { destination, steps } => {
            items.push(ListItem::new(format!(
                "  Destination ({:.0}, {:.0}), {} m",
                destination.x,
                destination.y,
                total_distance_m(steps)
            )));
            for step in steps {
                items.push(ListItem::new(Line::from(vec![
                    Span::styled(format!("    {:<11}", step.action.label()), Style::default().fg(Color::Cyan)),
                    Span::raw(format!(" {:>5} m  {}", step.distance_m, step.street)),
                ])));
            }
        }
    }

    f.render_widget(List::new(items).block(panel(" Navigation ")), area);
}

fn render_pharmacy(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.stats;
    let mut items: Vec<ListItem> = vec![ListItem::new(format!(
        "  Prescriptions: {}   batch #{}",
        stats.total_prescriptions, app.regenerations
    ))];

    let statuses: Vec<String> = PrescriptionStatus::ALL
        .iter()
        .map(|s| format!("{} {}", s.label(), stats.count(*s)))
        .collect();
    for chunk in statuses.chunks(3) {
        items.push(ListItem::new(format!("    {}", chunk.join("  "))));
    }

    items.push(ListItem::new(format!("  Prior auth pending:    {}", stats.prior_auth_needed)));
    items.push(ListItem::new(format!("  Controlled substances: {}", stats.controlled_substances)));
    items.push(ListItem::new(format!("  Refills due:           {}", stats.refills_due)));
    let (label, color) = if app.batch_consistent {
        ("VERIFIED", Color::Green)
    } else {
        ("FAILED", Color::Red)
    };
    items.push(ListItem::new(Line::from(vec![
        Span::raw("  Batch consistency:     "),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])));

    f.render_widget(List::new(items).block(panel(" Pharmacy ")), area);
}

fn render_events(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .events
        .iter()
        .rev()
        .map(|line| ListItem::new(format!("  {}", line)))
        .collect();
    f.render_widget(List::new(items).block(panel(" Events ")), area);
}

fn render_footer(f: &mut Frame, area: Rect, _app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let spans = vec![
        Span::styled(" [space] ", key),
        Span::raw("Pause  "),
        Span::styled("[+/-] ", key),
        Span::raw("Speed  "),
        Span::styled("[n] ", key),
        Span::raw("Route  "),
        Span::styled("[c] ", key),
        Span::raw("Cancel  "),
        Span::styled("[r] ", key),
        Span::raw("New batch  "),
        Span::styled("[q] ", key),
        Span::raw("Quit"),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)).block(panel("")), area);
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn load_config() -> MedianResult<MedianConfig> {
    match std::env::var("MEDIAN_CONFIG") {
        Ok(path) => MedianConfig::from_file(Path::new(&path)),
        Err(_) => Ok(MedianConfig::default()),
    }
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("median-tui: {}", e);
            std::process::exit(1);
        }
    };
    let batch_size = config.generator.prescription_count.get();
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("median-tui: {}", e);
            std::process::exit(1);
        }
    };

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    // Redraw interval.
    const FRAME_MS: u64 = 100;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = Duration::from_millis(FRAME_MS).saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

                    KeyCode::Char(' ') => app.paused = !app.paused,
                    KeyCode::Char('+') | KeyCode::Char('=') => app.faster(),
                    KeyCode::Char('-') => app.slower(),
                    KeyCode::Char('n') | KeyCode::Char('N') => app.request_random_route(),
                    KeyCode::Char('c') | KeyCode::Char('C') => app.cancel_route(),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.regenerate_batch(batch_size),
                    _ => {}
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= Duration::from_millis(FRAME_MS) {
            app.update(elapsed);
            last_frame = Instant::now();
        }
    }

    restore_terminal(&mut terminal)?;
    app.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(MedianConfig::default()).unwrap()
    }

    #[test]
    fn paused_app_does_not_advance() {
        let mut app = app();
        app.paused = true;
        app.update(Duration::from_secs(60));
        assert_eq!(app.sim.state().now_ms, 0);
    }

    #[test]
    fn speed_scales_simulated_time() {
        let mut app = app();
        app.faster();
        app.faster();
        assert_eq!(app.speed(), 4);
        app.update(Duration::from_millis(2_000));
        assert_eq!(app.sim.state().now_ms, 8_000);
        assert_eq!(app.sim.state().ticks, 1);

        for _ in 0..10 {
            app.slower();
        }
        assert_eq!(app.speed(), 1);
    }

    #[test]
    fn route_then_cancel() {
        let mut app = app();
        app.request_random_route();
        assert!(app.sim.state().navigation.is_calculating());
        app.cancel_route();
        assert_eq!(app.sim.state().navigation, Navigation::Idle);
    }

    #[test]
    fn regenerate_changes_batch_number_and_keeps_size() {
        let mut app = app();
        let first = app.stats.clone();
        app.regenerate_batch(first.total_prescriptions);
        assert_eq!(app.regenerations, 2);
        assert_eq!(app.stats.total_prescriptions, first.total_prescriptions);
        assert!(app.batch_consistent);
    }

    #[test]
    fn event_log_is_bounded() {
        let mut app = app();
        app.update(Duration::from_secs(120));
        assert!(app.events.len() <= EVENT_LOG_LEN);
        assert!(!app.events.is_empty());
        let state = app.shutdown();
        assert_eq!(state.ticks, 15);
    }
}
