//! Main guide executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session and logger
//!     - Load parameters
//!     - Initialise the network connections (scan stream, velocity sink,
//!       navigation service)
//!     - Start the obstacle monitor in the background
//!     - Hand the foreground to the guide manager's mode dispatch loop
//!
//! The guide manager owns the session from there: it reads a mode token and
//! runs the selected session until it naturally ends (autonomous: goal
//! resolved; manual/assisted: the user issues a switch mode command), then
//! prompts again. The obstacle monitor keeps the shared range reading fresh
//! the whole time, whatever mode is active.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;

// Internal
use guide_lib::{
    auto_nav::AutoNav,
    cmd_input::CmdInput,
    drive::{AssistedDriver, ManualDriver},
    goal_check::GoalCheck,
    guide_mgr::GuideMgr,
    nav_client::NavClient,
    obs_mon::{ObsMon, ObsMonParams},
    params::GuideExecParams,
    scan_client::ScanClient,
    vel_pub::VelPub,
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("guide_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Deimos Guide Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: GuideExecParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let scan_client = ScanClient::new(&zmq_ctx, &exec_params)
        .wrap_err("Failed to initialise the ScanClient")?;
    info!("ScanClient initialised");

    let vel_pub = VelPub::new(&zmq_ctx, &exec_params)
        .wrap_err("Failed to initialise the VelPub")?;
    info!("VelPub initialised");

    let nav_client = NavClient::new(&zmq_ctx, &exec_params)
        .wrap_err("Failed to initialise the NavClient")?;
    info!("NavClient initialised");

    info!("Network initialisation complete\n");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let obs_mon_params: ObsMonParams =
        util::params::load("obs_mon.toml").wrap_err("Could not load ObsMon params")?;
    let obs_mon = ObsMon::start(scan_client, obs_mon_params);
    info!("ObsMon started");

    let goal_check =
        GoalCheck::init("goal_check.toml").wrap_err("Failed to initialise the GoalCheck")?;
    info!("GoalCheck init complete");

    let auto_nav = AutoNav::init("auto_nav.toml").wrap_err("Failed to initialise AutoNav")?;
    info!("AutoNav init complete");

    let mut manual = ManualDriver::default();
    manual
        .init("drive.toml", &session)
        .wrap_err("Failed to initialise the ManualDriver")?;
    info!("ManualDriver init complete");

    let mut assisted = AssistedDriver::default();
    assisted
        .init("drive.toml", &session)
        .wrap_err("Failed to initialise the AssistedDriver")?;
    info!("AssistedDriver init complete");

    let cmd_input = CmdInput::new().wrap_err("Failed to initialise the console input")?;

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut guide_mgr = GuideMgr::new(
        cmd_input, obs_mon, vel_pub, nav_client, goal_check, auto_nav, manual, assisted,
    );

    guide_mgr.run().wrap_err("Guide manager failed")?;

    // ---- SHUTDOWN ----

    guide_mgr.shutdown();

    info!("End of execution");

    Ok(())
}
