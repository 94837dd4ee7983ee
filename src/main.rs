use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use acadmix::{
    Catalog, DemoConfig, LoanIdGenerator, Person, RandomLoanIds, SeededLoanIds, Staff,
    StaffRegistry, SAMPLE_CATALOG,
};

fn main() -> Result<()> {
    let config = DemoConfig::from_env().context("Failed to resolve configuration")?;
    init_tracing(&config.log_filter);

    run_walkthrough(&config)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_walkthrough(config: &DemoConfig) -> Result<()> {
    println!("🎓 Acadmix {} - enrollment walkthrough", acadmix::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load catalog
    println!("\n📂 Loading catalog...");
    let mut catalog = Catalog::new();
    let report = match &config.catalog_path {
        Some(path) => catalog
            .load_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => catalog
            .load_str(SAMPLE_CATALOG)
            .context("Failed to load built-in catalog")?,
    };
    println!(
        "✓ {} courses offered ({} duplicates, {} malformed lines skipped)",
        catalog.len(),
        report.duplicates,
        report.skipped
    );
    for course in catalog.courses() {
        println!("   {}", course);
    }

    // 2. Staff + student
    println!("\n🧑‍🏫 Setting up staff...");
    let mut registry = StaffRegistry::new();
    let director = Staff::new("Jane Doe", "214-49-2890");
    let advisor = Staff::new("John Doe", "614-49-6590").with_supervisor(&director);
    registry.register(director);
    let advisor_key = registry.register(advisor);
    let advisor = registry
        .get(advisor_key)
        .context("Advisor missing from registry")?;
    if let Some(supervisor) = registry.supervisor_of(advisor) {
        println!("✓ {} reports to {}", advisor, supervisor);
    }

    let person = Person::try_new("Jason Lee", "204-99-2890").context("Invalid student identity")?;
    let mut student = advisor.create_student(&person);
    println!("✓ Created {}", student);

    // 3. Hold blocks registration
    println!("\n🚧 Hold check...");
    advisor.apply_hold(&mut student);
    println!("   with hold: {}", student.register_semester());
    advisor.remove_hold(&mut student);

    // 4. Register + enroll
    println!("\n📝 Registering semester...");
    println!("   {}", student.register_semester());

    for course_id in ["CMPSC 132", "MATH 230", "CMPEN 270", "CMPSC 132", "CMPSC 311", "ART 001"] {
        println!("   enroll {:<10} → {}", course_id, student.enroll_course(course_id, &catalog));
    }

    if let Some(semester) = student.current_semester() {
        println!(
            "✓ Semester {}: {} ({} credits, full-time: {})",
            student.semester_count(),
            semester,
            semester.total_credits(),
            semester.is_full_time()
        );
    }

    // 5. Balance + drop
    println!("\n💳 Account...");
    if let Some(account) = student.account() {
        println!("{}", account);
    }
    println!("   drop CMPSC 311 → {}", student.drop_course("CMPSC 311"));
    println!("   enroll PHYS 213 → {}", student.enroll_course("PHYS 213", &catalog));
    if let Some(balance) = student.balance() {
        println!("   balance now ${}", balance);
    }

    // 6. Loan
    println!("\n💵 Requesting loan...");
    let mut ids: Box<dyn LoanIdGenerator> = match config.loan_seed {
        Some(seed) => Box::new(SeededLoanIds::new(seed)),
        None => Box::new(RandomLoanIds),
    };
    println!("   {}", student.get_loan(4000.0, ids.as_mut()));
    if let Some(account) = student.account() {
        for loan in account.loans() {
            println!("   loan {} → {}", loan.id(), loan);
        }
        println!("{}", account);
    }

    // 7. Summary
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Summary");
    let summary = serde_json::to_string_pretty(&student.summary()).context("Failed to render summary")?;
    println!("{}", summary);

    println!("\n✅ Walkthrough complete");

    Ok(())
}
