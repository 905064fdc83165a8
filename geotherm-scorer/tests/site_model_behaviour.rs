//! Behavioural tests for the reference site model.

use std::cell::RefCell;

use geotherm_core::Coordinate;
use geotherm_scorer::{
    FaultZones, GridGeometry, RasterGrid, SiteEvaluation, SiteModel, SiteModelError,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// 60°×60° grid around the origin holding a single value.
fn uniform(value: f32) -> RasterGrid {
    let geometry = GridGeometry {
        origin_lon: -30.0,
        origin_lat: 30.0,
        pixel_size: 0.5,
        width: 120,
        height: 120,
    };
    RasterGrid::new(geometry, vec![value; geometry.cell_count()], None).expect("valid grid")
}

#[fixture]
fn model() -> RefCell<Option<SiteModel>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Option<Result<SiteEvaluation, SiteModelError>>> {
    RefCell::new(None)
}

fn evaluation(
    outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
) -> SiteEvaluation {
    outcome
        .borrow()
        .clone()
        .expect("site must be evaluated")
        .expect("evaluation must succeed")
}

#[given("rasters with heat flow {heatflow} and temperature {temperature}")]
fn given_rasters(
    #[from(model)] model: &RefCell<Option<SiteModel>>,
    heatflow: f32,
    temperature: f32,
) {
    *model.borrow_mut() = Some(SiteModel::new(
        uniform(heatflow),
        uniform(temperature),
        FaultZones::mock(),
    ));
}

#[when("I evaluate the site at latitude {latitude} and longitude {longitude}")]
fn when_evaluate(
    #[from(model)] model: &RefCell<Option<SiteModel>>,
    #[from(outcome)] outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
    latitude: f64,
    longitude: f64,
) {
    let guard = model.borrow();
    let site_model = guard.as_ref().expect("model must be initialised");
    *outcome.borrow_mut() = Some(site_model.evaluate(Coordinate::new(latitude, longitude)));
}

#[then("the score is {score}")]
fn then_score(
    #[from(outcome)] outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
    score: f64,
) {
    let actual = evaluation(outcome).score;
    assert!((actual - score).abs() < 1e-9, "expected {score}, got {actual}");
}

#[then("the feasibility is {level}")]
fn then_feasibility(
    #[from(outcome)] outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
    level: String,
) {
    assert_eq!(
        evaluation(outcome).feasibility.as_str(),
        level.trim_matches('"')
    );
}

#[then("the site lies in a fault zone")]
fn then_in_fault(
    #[from(outcome)] outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
) {
    assert!(evaluation(outcome).in_fault_zone);
}

#[then("no data is available")]
fn then_no_data(
    #[from(outcome)] outcome: &RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(SiteModelError::NoData { .. }))),
        "expected NoData, got {borrowed:?}"
    );
}

macro_rules! register_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/site_model.feature", index = $index)]
        fn $fn_name(
            model: RefCell<Option<SiteModel>>,
            outcome: RefCell<Option<Result<SiteEvaluation, SiteModelError>>>,
        ) {
            let _ = (model, outcome);
        }
    };
}

register_scenario!(hot_site_on_fault, 0);
register_scenario!(moderate_site_away_from_faults, 1);
register_scenario!(cold_site_with_fault_bonus, 2);
register_scenario!(site_outside_rasters, 3);
