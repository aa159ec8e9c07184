//! Console reports, one per subcommand.

use median_clinical::{
    case_studies::{case_studies as case_study_catalog, case_studies_by_category, case_studies_for_product, search_case_studies},
    compliance::{calculate_compliance_stats, generate_ai_model_records},
    fingerprint::short_fingerprint,
    formulary::Formulary,
    invariants::check_prescription_batch,
    medula::{build_invoices, calculate_medula_stats, generate_provisions, search_sut_codes, sut_catalog, sut_codes_by_category},
    pharmacy::generate_prescription_batch,
    seed::{Domain, SeedStreams},
    stats::{calculate_pharmacy_stats, prescriptions_by_status, search_prescriptions},
};
use median_contracts::{
    label::Labeled,
    medula::{format_try, SutCategory, SutCode},
    prescription::PrescriptionStatus,
    simulation::{GeoPoint, MapPoint, Road},
};
use median_sim::{
    geo::{FixedLocator, GeoLocator, UnavailableLocator},
    navigation::total_distance_m,
    SimEvent, Simulator,
};
use serde::Serialize;

use crate::{Context, DemoResult};

fn print_json<T: Serialize + ?Sized>(value: &T) -> DemoResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn heading(title: &str) {
    println!("=== {} ===", title);
    println!();
}

// ── Pharmacy ──────────────────────────────────────────────────────────────────

pub fn prescriptions(
    ctx: &Context,
    count: usize,
    status: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> DemoResult<()> {
    let formulary = Formulary::standard();
    let mut list = generate_prescription_batch(&ctx.seeds, &formulary, count, ctx.today);
    if let Some(status) = status {
        list = prescriptions_by_status(&list, status);
    }
    if let Some(query) = search {
        list = search_prescriptions(&list, query);
    }

    if json {
        return print_json(&list);
    }

    heading("Prescriptions");
    for rx in &list {
        println!(
            "  {}  {}  {:<22} {:<28} {:<12} qty {:>4}{}",
            rx.rx_number,
            rx.write_date,
            rx.patient.name,
            rx.medication.display_name(),
            rx.status,
            rx.quantity,
            if rx.is_controlled() { "  [C]" } else { "" }
        );
        println!("      Sig: {}", rx.directions);
    }
    println!();
    println!("  {} record(s), fingerprint {}", list.len(), short_fingerprint(&list));
    println!();
    Ok(())
}

pub fn pharmacy_stats(ctx: &Context, count: usize) -> DemoResult<()> {
    let formulary = Formulary::standard();
    let list = generate_prescription_batch(&ctx.seeds, &formulary, count, ctx.today);
    let stats = calculate_pharmacy_stats(&list, ctx.today);
    let report = check_prescription_batch(&list);

    heading("Pharmacy Dashboard");
    println!("  Total prescriptions:    {}", stats.total_prescriptions);
    for status in PrescriptionStatus::ALL {
        println!("    {:<20} {}", status.label(), stats.count(*status));
    }
    println!("  Prior auth pending:     {}", stats.prior_auth_needed);
    println!("  Controlled substances:  {}", stats.controlled_substances);
    println!("  Refills due:            {}", stats.refills_due);
    println!();
    println!(
        "  Batch consistency:      {} ({} failure(s))",
        if report.passed { "VERIFIED" } else { "FAILED" },
        report.failures.len()
    );
    for failure in &report.failures {
        println!("    [{}] {}", failure.rule_id, failure.message);
    }
    println!("  Batch fingerprint:      {}", short_fingerprint(&list));
    println!();
    Ok(())
}

// ── Medula ────────────────────────────────────────────────────────────────────

fn print_sut_codes(codes: &[SutCode]) {
    for code in codes {
        println!(
            "  {:<9} {:<36} {:<14} {:>5} pts {:>14}{}",
            code.code,
            code.name,
            code.category,
            code.points,
            format_try(code.price_kurus),
            if code.special_code { "  [special]" } else { "" }
        );
    }
    println!();
    println!("  {} code(s)", codes.len());
    println!();
}

pub fn sut_search(query: &str) -> DemoResult<()> {
    heading(&format!("SUT search: '{}'", query));
    print_sut_codes(&search_sut_codes(&sut_catalog(), query));
    Ok(())
}

pub fn sut_category(category: &str) -> DemoResult<()> {
    heading(&format!("SUT category: {}", category));
    let codes = sut_codes_by_category(&sut_catalog(), category);
    if codes.is_empty() {
        let known: Vec<&str> = SutCategory::ALL.iter().map(|c| c.label()).collect();
        println!("  No codes. Known categories: {}", known.join(", "));
        println!();
        return Ok(());
    }
    print_sut_codes(&codes);
    Ok(())
}

pub fn provisions(ctx: &Context, count: usize, json: bool) -> DemoResult<()> {
    let mut rng = ctx.seeds.rng(Domain::Medula);
    let list = generate_provisions(&mut rng, &sut_catalog(), count, ctx.today);
    let invoices = build_invoices(&list);
    let stats = calculate_medula_stats(&list);

    if json {
        return print_json(&serde_json::json!({
            "provisions": list,
            "invoices": invoices,
            "stats": stats,
        }));
    }

    heading("Medula Provisions");
    for p in &list {
        println!(
            "  {}  {}  {:<20} {:<13} {:<13} {:<9} {:>14}",
            p.provision_number,
            p.date,
            p.patient_name,
            p.insurance_type,
            p.treatment_type,
            p.status,
            format_try(p.amount_kurus)
        );
        if let Some(reason) = &p.rejection_reason {
            println!("      Rejected: {}", reason);
        }
    }
    println!();
    println!(
        "  Approved {}  Pending {}  Rejected {}  Expired {}  Total billed {}",
        stats.approved,
        stats.pending,
        stats.rejected,
        stats.expired,
        format_try(stats.total_amount_kurus)
    );
    println!();
    println!("  Invoices:");
    for invoice in &invoices {
        println!(
            "    {}  {:<9} {:>3} provision(s)  approved total {}",
            invoice.invoice_number,
            invoice.status,
            invoice.provision_numbers.len(),
            format_try(invoice.total_kurus)
        );
    }
    println!();
    Ok(())
}

// ── Compliance ────────────────────────────────────────────────────────────────

pub fn ai_models(ctx: &Context, count: usize, json: bool) -> DemoResult<()> {
    let mut rng = ctx.seeds.rng(Domain::Compliance);
    let records = generate_ai_model_records(&mut rng, count, ctx.today);
    let stats = calculate_compliance_stats(&records);

    if json {
        return print_json(&records);
    }

    heading("FDA AI Model Registry");
    for r in &records {
        let cleared = r.clearance_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<16} {:<24} class {:<3} {:<8} {:<22} cleared {:<10}  sens {:.2} spec {:.2}  findings {}",
            r.name,
            r.vendor,
            r.device_class,
            r.pathway,
            r.status,
            cleared,
            r.sensitivity,
            r.specificity,
            r.open_findings
        );
    }
    println!();
    println!(
        "  Cleared {}  Under review {}  Post-market {}  Recalled {}  Avg sensitivity {:.3}  With findings {}",
        stats.cleared, stats.under_review, stats.post_market, stats.recalled, stats.average_sensitivity, stats.models_with_findings
    );
    println!();
    Ok(())
}

// ── Case studies ──────────────────────────────────────────────────────────────

pub fn case_studies(category: Option<&str>, query: Option<&str>, product: Option<&str>) -> DemoResult<()> {
    let mut list = case_study_catalog();
    if let Some(category) = category {
        list = case_studies_by_category(&list, category);
    }
    if let Some(query) = query {
        list = search_case_studies(&list, query);
    }
    if let Some(product) = product {
        list = case_studies_for_product(&list, product);
    }

    heading("Case Studies");
    for s in &list {
        println!("  [{}] {} ({}, {}, {})", s.category, s.title, s.hospital, s.city, s.year);
        println!("      {}  |  {}", s.headline_metric, s.products.join(", "));
    }
    println!();
    println!("  {} case stud{}", list.len(), if list.len() == 1 { "y" } else { "ies" });
    println!();
    Ok(())
}

// ── Map simulator ─────────────────────────────────────────────────────────────

pub fn simulate(
    ctx: &Context,
    ticks: u64,
    start_hour: Option<u8>,
    route: Option<MapPoint>,
    at: Option<GeoPoint>,
) -> DemoResult<()> {
    let mut settings = ctx.config.simulation.clone();
    if let Some(hour) = start_hour {
        settings.start_hour = hour;
    }

    let locator: Box<dyn GeoLocator> = match at {
        Some(point) => Box::new(FixedLocator(point)),
        None => Box::new(UnavailableLocator::new("no position source in the CLI")),
    };
    let rng = SeedStreams::new(settings.seed).rng(Domain::Map);
    let mut sim = Simulator::with_rng(settings, rng, locator.as_ref())?;

    heading("Map Simulator");
    let start = sim.state();
    println!(
        "  Start: {:02}:00  weather {}  position ({:.4}, {:.4})",
        start.hour, start.weather, start.position.lat, start.position.lon
    );

    if let Some(destination) = route {
        sim.request_route(destination)?;
        println!("  Route requested to ({:.1}, {:.1})", destination.x, destination.y);
    }
    println!();

    for _ in 0..ticks {
        let fired = sim.advance_ticks(1);
        let state = sim.state();
        let incident = state
            .incident
            .map(|i| format!("{} on {} road", i.kind, i.road))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "  {:02}:00  {:<5}  main {:<8}  cross {:<8}  incident {:<18}  pois {}",
            state.hour,
            state.weather,
            state.density(Road::Main),
            state.density(Road::Cross),
            incident,
            state.pois.len()
        );
        if fired.contains(&SimEvent::RouteReady) {
            let steps = state.navigation.steps();
            println!("         route ready: {} step(s), {} m", steps.len(), total_distance_m(steps));
            for step in steps {
                println!("           {:<11} {:>5} m  {}", step.action, step.distance_m, step.street);
            }
        }
    }

    let pending = sim.pending_timers();
    let final_state = sim.teardown();
    println!();
    println!(
        "  Stopped after {} tick(s); {} pending timer(s) cleared",
        final_state.ticks, pending
    );
    println!();
    Ok(())
}
