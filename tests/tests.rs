use quadsim::{
    gaussian_galaxy, leapfrog_integrator, softened_accel, AccelSet, Engine, ForceConfig, NVec2,
    NewtonianGravity, NewtonianGravityBarnesHut, NodeKind, Parameters, QuadTree, Scenario,
    ScenarioConfig, System,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a simple 2-body System separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let mut sys = System::new();
    sys.add_body(-dist / 2.0, 0.0, 0.0, 0.0, m1);
    sys.add_body(dist / 2.0, 0.0, 0.0, 0.0, m2);
    sys
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        t_end: 1.0,
        dt: 0.001,
        eps: 0.0,
        g: 0.1,
        seed: 42,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        g: p.g,
        eps: p.eps,
    })
}

/// Deterministic scattered system for tree/direct comparisons
pub fn random_system(n: usize, seed: u64) -> System {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sys = System::new();
    for _ in 0..n {
        sys.add_body(
            rng.random_range(-500.0..500.0),
            rng.random_range(-500.0..500.0),
            0.0,
            0.0,
            rng.random_range(0.5..5.0),
        );
    }
    sys
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc).unwrap();

    let net = acc[0] * sys.masses()[0] + acc[1] * sys.masses()[1];

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc).unwrap();

    let dx = sys.px()[1] - sys.px()[0];
    assert!(dx > 0.0);
    assert!(acc[0].x > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].x < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc_r = vec![NVec2::zeros(); 2];
    let mut acc_2r = vec![NVec2::zeros(); 2];

    forces.accumulate_accels(&sys_r, &mut acc_r).unwrap();
    forces.accumulate_accels(&sys_2r, &mut acc_2r).unwrap();

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert!((ratio - 4.0).abs() < 1e-3, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_softening_prevents_blowup() {
    let mut p = test_params();
    p.eps = 0.3;

    let sys = two_body_system(1e-9, 1.0, 1.0);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc).unwrap();

    assert!(acc[0].norm() < 1e9, "Softening failed; acceleration too large");
    assert!(acc[0].norm().is_finite());
}

#[test]
fn softened_kernel_monotonic_and_finite() {
    let g = 0.3;
    let eps = 7.0;
    let origin = NVec2::new(0.0, 0.0);

    let mut last = f64::INFINITY;
    for r in [1.0, 2.0, 5.0, 10.0, 50.0, 200.0, 1000.0] {
        let a = softened_accel(NVec2::new(r, 0.0), origin, 1.0, g, eps);
        assert!(a.norm().is_finite());
        assert!(
            a.norm() < last,
            "magnitude did not decrease at r = {r}: {} >= {last}",
            a.norm()
        );
        last = a.norm();
    }

    // Coincident points: zero, never NaN
    let a0 = softened_accel(origin, origin, 1.0, g, eps);
    assert_eq!(a0, NVec2::zeros());
}

// ==================================================================================
// Quadtree tests
// ==================================================================================

#[test]
fn tree_five_point_scenario() {
    let mut tree = QuadTree::from_bounds(0.0, 0.0, 100.0);
    for (x, y) in [(20.0, 20.0), (60.0, 20.0), (60.0, 30.0), (80.0, 30.0), (75.0, 75.0)] {
        tree.insert(x, y, 1.0).unwrap();
    }

    let root = tree.root();
    assert_eq!(root.kind, NodeKind::Internal);
    assert!((root.mass - 5.0).abs() < 1e-12);
    // Equal masses, so the COM is the arithmetic mean of the five points
    assert!((root.com.x - 59.0).abs() < 1e-9, "COM x = {}", root.com.x);
    assert!((root.com.y - 35.0).abs() < 1e-9, "COM y = {}", root.com.y);

    // Geometry of the five points: one body upper-left, three upper-right,
    // one lower-right; the lower-left quadrant never gets a child.
    let occupied = root.children.iter().filter(|c| c.is_some()).count();
    assert_eq!(occupied, 3);
    assert!(root.children[0].is_some(), "upper-left quadrant missing");
    assert!(root.children[1].is_some(), "upper-right quadrant missing");
    assert!(root.children[2].is_none(), "lower-left quadrant should be empty");
    assert!(root.children[3].is_some(), "lower-right quadrant missing");
}

#[test]
fn tree_root_mass_matches_total() {
    let sys = random_system(300, 9);
    let tree = QuadTree::build(&sys).unwrap();

    let total = sys.total_mass();
    assert!(
        (tree.root().mass - total).abs() < 1e-9 * total,
        "root mass {} != total {}",
        tree.root().mass,
        total
    );
}

#[test]
fn tree_bounds_contain_all_bodies() {
    let sys = random_system(100, 3);
    let tree = QuadTree::build(&sys).unwrap();

    let origin = tree.origin();
    let size = tree.size();
    for i in 0..sys.len() {
        let (x, y) = (sys.px()[i], sys.py()[i]);
        assert!(origin.x < x && x < origin.x + size, "x = {x} outside bounds");
        assert!(origin.y < y && y < origin.y + size, "y = {y} outside bounds");
    }
}

#[test]
fn tree_rejects_out_of_bounds_insert() {
    let mut tree = QuadTree::from_bounds(0.0, 0.0, 10.0);
    assert!(tree.insert(5.0, 5.0, 1.0).is_ok());
    assert!(tree.insert(-1.0, 5.0, 1.0).is_err());
    assert!(tree.insert(5.0, 11.0, 1.0).is_err());
}

#[test]
fn tree_coincident_bodies_merge_at_depth_limit() {
    let mut tree = QuadTree::from_bounds(0.0, 0.0, 10.0);
    tree.insert(5.0, 5.0, 1.0).unwrap();
    tree.insert(5.0, 5.0, 3.0).unwrap();

    let root = tree.root();
    assert!((root.mass - 4.0).abs() < 1e-12);
    assert!((root.com.x - 5.0).abs() < 1e-9);
    assert!((root.com.y - 5.0).abs() < 1e-9);

    // Query away from the merged pair stays finite and sees both masses
    let a = tree.acceleration_at(9.0, 5.0, 1.0, 0.0, 0.5);
    assert!(a.norm().is_finite());
    assert!(a.x < 0.0, "acceleration should point toward the merged mass");
}

#[test]
fn tree_matches_direct_at_theta_zero() {
    let sys = random_system(200, 17);
    let p = test_params();

    let direct = gravity_set(&p);
    let tree = AccelSet::new().with(NewtonianGravityBarnesHut {
        g: p.g,
        eps: p.eps,
        theta: 0.0,
    });

    let n = sys.len();
    let mut acc_direct = vec![NVec2::zeros(); n];
    let mut acc_tree = vec![NVec2::zeros(); n];
    direct.accumulate_accels(&sys, &mut acc_direct).unwrap();
    tree.accumulate_accels(&sys, &mut acc_tree).unwrap();

    for i in 0..n {
        let diff = (acc_direct[i] - acc_tree[i]).norm();
        assert!(
            diff < 1e-12 + 1e-9 * acc_direct[i].norm(),
            "body {i}: direct {:?} vs tree {:?}",
            acc_direct[i],
            acc_tree[i]
        );
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn leapfrog_time_reversible() {
    let mut p = test_params();
    p.dt = 0.03;
    let forces = gravity_set(&p);

    let mut sys = System::from_initial_state(
        vec![-5.0, 5.0],
        vec![0.0, 0.0],
        vec![0.1, -0.05],
        vec![0.2, -0.1],
        vec![1.0, 2.0],
    )
    .unwrap();
    let (px0, py0) = sys.positions();
    let (vx0, vy0) = sys.velocities();

    leapfrog_integrator(&mut sys, &forces, &p).unwrap();

    // Negate velocities and step again: the trajectory retraces itself
    let mut reversed = System::from_initial_state(
        sys.px().to_vec(),
        sys.py().to_vec(),
        sys.vx().iter().map(|v| -v).collect(),
        sys.vy().iter().map(|v| -v).collect(),
        sys.masses().to_vec(),
    )
    .unwrap();

    leapfrog_integrator(&mut reversed, &forces, &p).unwrap();

    for i in 0..reversed.len() {
        assert!(
            (reversed.px()[i] - px0[i]).abs() < 1e-10,
            "x[{i}] did not return: {} vs {}",
            reversed.px()[i],
            px0[i]
        );
        assert!((reversed.py()[i] - py0[i]).abs() < 1e-10);
        assert!((reversed.vx()[i] + vx0[i]).abs() < 1e-10);
        assert!((reversed.vy()[i] + vy0[i]).abs() < 1e-10);
    }
}

#[test]
fn two_body_symmetric_approach() {
    let parameters = Parameters {
        t_end: 1.0,
        dt: 0.03,
        eps: 7.0,
        g: 0.3,
        seed: 0,
    };
    let engine = Engine {
        force: ForceConfig::Direct,
        theta: 0.5,
    };
    let mut scenario = Scenario::from_initial_state(
        vec![0.0, 10.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        parameters,
        engine,
    )
    .unwrap();

    scenario.advance_step().unwrap();
    assert_eq!(scenario.frame(), 1);

    let sys = &scenario.system;
    assert!(sys.px()[0] > 0.0, "body 0 did not move toward body 1");
    assert!(sys.px()[1] < 10.0, "body 1 did not move toward body 0");

    // Equal masses: the approach is symmetric about the midpoint
    assert!((sys.px()[0] + sys.px()[1] - 10.0).abs() < 1e-12);

    // Combined momentum stays ~0
    let momentum_x = sys.vx()[0] * sys.masses()[0] + sys.vx()[1] * sys.masses()[1];
    let momentum_y = sys.vy()[0] * sys.masses()[0] + sys.vy()[1] * sys.masses()[1];
    assert!(momentum_x.abs() < 1e-12, "momentum x = {momentum_x}");
    assert!(momentum_y.abs() < 1e-12, "momentum y = {momentum_y}");
}

#[test]
fn frame_counter_increments_per_step() {
    let p = test_params();
    let forces = gravity_set(&p);
    let mut sys = two_body_system(5.0, 1.0, 1.0);

    assert_eq!(sys.frame(), 0);
    for expected in 1..=5 {
        leapfrog_integrator(&mut sys, &forces, &p).unwrap();
        assert_eq!(sys.frame(), expected);
    }
}

// ==================================================================================
// Galaxy generator tests
// ==================================================================================

#[test]
fn galaxy_generation_is_deterministic() {
    let p = Parameters::default();

    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    let a = gaussian_galaxy(200, 100.0, -50.0, 1.5, -0.5, 60.0, &p, 0.5, &mut rng_a).unwrap();
    let b = gaussian_galaxy(200, 100.0, -50.0, 1.5, -0.5, 60.0, &p, 0.5, &mut rng_b).unwrap();

    assert_eq!(a.px(), b.px());
    assert_eq!(a.py(), b.py());
    assert_eq!(a.vx(), b.vx());
    assert_eq!(a.vy(), b.vy());
    assert_eq!(a.masses(), b.masses());
}

#[test]
fn galaxy_structure() {
    let p = Parameters::default();
    let mut rng = StdRng::seed_from_u64(0);
    let n = 300;
    let galaxy = gaussian_galaxy(n, 700.0, 700.0, 0.0, 0.0, 120.0, &p, 0.5, &mut rng).unwrap();

    assert_eq!(galaxy.len(), n);

    // Central attractor as massive as the whole disk
    assert_eq!(galaxy.masses()[0], n as f64);
    assert!(galaxy.masses()[1..].iter().all(|&m| m == 1.0));

    // Core exclusion: every disk body sits outside squared radius 100
    for i in 1..n {
        let dx = galaxy.px()[i] - 700.0;
        let dy = galaxy.py()[i] - 700.0;
        assert!(dx * dx + dy * dy > 100.0, "body {i} inside the core exclusion");
    }

    // Velocities are finite everywhere (no degenerate-field NaNs)
    assert!(galaxy.vx().iter().all(|v| v.is_finite()));
    assert!(galaxy.vy().iter().all(|v| v.is_finite()));
}

// ==================================================================================
// State / scenario tests
// ==================================================================================

#[test]
fn from_initial_state_rejects_mismatched_lengths() {
    let result = System::from_initial_state(
        vec![0.0, 1.0],
        vec![0.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        vec![1.0, 1.0],
    );
    assert!(result.is_err());
}

#[test]
fn add_bodies_appends_in_order() {
    let mut a = System::new();
    a.add_body(0.0, 0.0, 0.0, 0.0, 1.0);

    let mut b = System::new();
    b.add_body(1.0, 2.0, 3.0, 4.0, 5.0);
    b.add_body(6.0, 7.0, 8.0, 9.0, 10.0);

    a.add_bodies(&b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.px(), &[0.0, 1.0, 6.0]);
    assert_eq!(a.masses(), &[1.0, 5.0, 10.0]);
}

#[test]
fn snapshot_accessors_are_defensive_copies() {
    let mut sys = System::new();
    sys.add_body(1.0, 2.0, 3.0, 4.0, 5.0);

    let (mut px, _) = sys.positions();
    px[0] = 99.0;
    assert_eq!(sys.px()[0], 1.0, "caller mutated internal state");
}

#[test]
fn scenario_builds_from_yaml() {
    let yaml = r#"
engine:
  force: "barnes_hut"
  theta: 0.5
parameters:
  t_end: 1.0
  dt: 0.03
  eps: 7.0
  g: 0.3
  seed: 0
bodies:
  - x: [ 0.0, 0.0 ]
    v: [ 0.0, 0.0 ]
    m: 1.0
galaxies:
  - n: 100
    center: [ 500.0, 500.0 ]
    drift: [ 0.0, 0.0 ]
    std_dev: 60.0
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let mut scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.body_count(), 101);
    scenario.advance_step().unwrap();
    assert_eq!(scenario.frame(), 1);
}
