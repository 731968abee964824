use imovel_console::cache::{CacheLocal, SnapshotListagem, CHAVE_LISTAGEM_IMOVEIS};
use imovel_console::models::FiltrosImoveis;
use imovel_console::pagina::{galeria_publica, MetadadosSeo};
use imovel_console::services::ApiClient;
use imovel_console::AppConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ITENS_POR_PAGINA: u32 = 12;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG tem precedência sobre LOG_LEVEL
    let filtro = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filtro).init();

    info!("🏠 Console de imóveis");
    info!("API: {}", config.api_url);

    let cache = CacheLocal::new(&config.cache_dir, config.cache_ttl);
    let snapshot = match cache.ler(&CHAVE_LISTAGEM_IMOVEIS) {
        Some(snapshot) => {
            info!("Usando listagem em cache (página {})", snapshot.pagina);
            snapshot
        }
        None => {
            let client = ApiClient::from_config(&config)?;
            let filtros = FiltrosImoveis::default();
            let pagina = match client.listar_imoveis(&filtros, 1, ITENS_POR_PAGINA).await {
                Ok(pagina) => pagina,
                Err(e) => {
                    warn!("Falha ao listar imóveis: {}", e);
                    anyhow::bail!(e.mensagem_usuario());
                }
            };
            info!(
                "✅ {} imóveis ({} no total, {} páginas)",
                pagina.data.len(),
                pagina.pagination.total_items,
                pagina.pagination.total_pages
            );

            let snapshot = SnapshotListagem {
                filtros,
                pagina: 1,
                imoveis: pagina.data,
            };
            cache.gravar_silencioso(&CHAVE_LISTAGEM_IMOVEIS, &snapshot);
            snapshot
        }
    };

    for (i, imovel) in snapshot.imoveis.iter().enumerate() {
        let seo = MetadadosSeo::para_imovel(imovel, &config.site_url);
        println!("{}. [{}] {}", i + 1, imovel.codigo, seo.titulo);
        println!("   {}", imovel.endereco_completo());
        if let Some(valor) = imovel.valor_venda_numerico() {
            println!("   Venda: {}", imovel_console::formulario::formatar_moeda(&valor.to_string()));
        }
        println!("   URL: {}", seo.url_canonica);

        let galeria = galeria_publica(imovel);
        if galeria.len() < config.minimo_fotos {
            println!("   ⚠️  {} fotos (mínimo {})", galeria.len(), config.minimo_fotos);
        }
        for foto in &galeria {
            println!("     {:>2}. {}", foto.ordem.unwrap_or(0), foto.url);
        }
        println!();
    }

    Ok(())
}
