use crate::{body::Body, scalar::Scalar, vector::Vector3};

/// Speed of a circular orbit of radius `distance` around `mass`: `sqrt(G m / r)`.
/// A zero distance gives zero.
pub fn orbital_velocity(g: Scalar, mass: Scalar, distance: Scalar) -> Scalar {
    g.multiply(mass).divide(distance).sqrt()
}

/// Three equal masses of `1e10` at rest on an equilateral triangle of side 20.
pub fn triangle() -> Vec<Body> {
    vec![
        Body::new(0, "Body 1", Scalar::parse("10000000000"), Vector3::new(0.0, 0.0, 0.0), Vector3::ZERO)
            .with_color("#3B82F6")
            .with_radius(8.0),
        Body::new(1, "Body 2", Scalar::parse("10000000000"), Vector3::new(20.0, 0.0, 0.0), Vector3::ZERO)
            .with_color("#EF4444")
            .with_radius(8.0),
        Body::new(2, "Body 3", Scalar::parse("10000000000"), Vector3::new(10.0, 17.3205, 0.0), Vector3::ZERO)
            .with_color("#F59E0B")
            .with_radius(10.0),
    ]
}

/// Two unit masses circling each other with a heavier third body on the side.
pub fn three_body() -> Vec<Body> {
    vec![
        Body::new(0, "Body 1", 1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.2, 0.0))
            .with_color("#3B82F6")
            .with_radius(8.0),
        Body::new(1, "Body 2", 1.0, Vector3::new(100.0, 0.0, 0.0), Vector3::new(0.0, -0.2, 0.0))
            .with_color("#EF4444")
            .with_radius(8.0),
        Body::new(2, "Body 3", 2.0, Vector3::new(-50.0, 86.6, 0.0), Vector3::new(0.1732, -0.1, 0.0))
            .with_color("#F59E0B")
            .with_radius(10.0),
    ]
}

/// Generates `n` bodies distributed in a flat disc in the xy plane.
/// - Creates a massive central body.
/// - Places the others on random circular orbits around the center.
/// - Assigns speeds from the mass enclosed by each orbit, using `g`.
///
/// The same `seed` always yields the same bodies.
pub fn uniform_disc(n: usize, g: Scalar, seed: u64) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let inner_radius = 25.0;
    let outer_radius = (n as f64).sqrt() * 5.0 + inner_radius;

    let mut bodies: Vec<Body> = Vec::with_capacity(n);
    if n == 0 {
        return bodies;
    }

    bodies.push(
        Body::new(0, "Center", 1e6, Vector3::ZERO, Vector3::ZERO)
            .with_color("#FDE047")
            .with_radius(inner_radius),
    );

    while bodies.len() < n {
        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();

        // Uniform area distribution between the inner and outer radius
        let t = inner_radius / outer_radius;
        let r = rng.f64() * (1.0 - t * t) + t * t;
        let scale = outer_radius * r.sqrt();

        let id = bodies.len() as u32;
        // Unit tangent for now; scaled to orbital speed below
        bodies.push(Body::new(
            id,
            format!("Body {id}"),
            1.0,
            Vector3::new(cos * scale, sin * scale, 0.0),
            Vector3::new(sin, -cos, 0.0),
        ));
    }

    // Closest first, so each body only counts mass inside its orbit
    bodies.sort_by(|a, b| {
        a.position
            .magnitude()
            .to_number()
            .total_cmp(&b.position.magnitude().to_number())
    });

    let mut enclosed = Scalar::ZERO;
    for body in bodies.iter_mut() {
        enclosed = enclosed.add(body.mass);
        let distance = body.position.magnitude();
        if distance.is_zero() {
            continue;
        }
        let speed = orbital_velocity(g, enclosed, distance);
        body.velocity = body.velocity.scale(speed);
    }

    bodies
}
