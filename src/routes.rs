use crate::{api::funcionario, config::Config, error::AppError};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::Condition, web};
use tracing::debug;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Helper to build the per-IP limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    // Malformed bodies and unparseable ids answer with the JSON envelope
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected request body");
        AppError::MalformedBody.into()
    });
    let path_config = web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected path parameter");
        AppError::NotFound.into()
    });

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(
                config.rate_limit_per_min > 0,
                build_limiter(config.rate_limit_per_min),
            ))
            .app_data(json_config)
            .app_data(path_config)
            .service(
                web::scope("/funcionarios")
                    // /funcionarios
                    .service(
                        web::resource("")
                            .route(web::get().to(funcionario::list_funcionarios))
                            .route(web::post().to(funcionario::create_funcionario)),
                    )
                    // /funcionarios/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(funcionario::get_funcionario))
                            .route(web::put().to(funcionario::update_funcionario))
                            .route(web::delete().to(funcionario::delete_funcionario)),
                    ),
            ),
    );
}
