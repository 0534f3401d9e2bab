use sggx_slab::core::brdf::{eval_spherical, BRDF};
use sggx_slab::materials::single_scatter_sggx::SingleScatterSggxBrdf;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 6 {
        eprintln!("Usage: {} <alpha> <theta_i> <phi_i> <theta_o> <phi_o>  (angles in degrees)", args[0]);
        std::process::exit(1);
    }

    let mut values = [0.0f64; 5];
    for (k, value) in values.iter_mut().enumerate() {
        match args[k + 1].parse::<f64>() {
            Ok(v) => *value = v,
            Err(_) => {
                eprintln!("Not a number: {}", args[k + 1]);
                std::process::exit(1);
            }
        }
    }
    let [alpha, theta_i, phi_i, theta_o, phi_o] = values;

    let brdf = SingleScatterSggxBrdf::new(alpha);
    let value = eval_spherical(&brdf,
                               theta_i.to_radians(), phi_i.to_radians(),
                               theta_o.to_radians(), phi_o.to_radians());

    println!("{}", brdf.to_string());
    println!("f(wi, wo) = {:.8}", value);
}
