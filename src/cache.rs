//! Cache local com validade e chaves versionadas.
//!
//! Guarda snapshots em JSON num diretório. É só conveniência: qualquer falha
//! de leitura ou escrita vira "cache vazio" e a listagem é buscada de novo.

use crate::error::AppError;
use crate::models::{FiltrosImoveis, Imovel};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Chave tipada: o tipo do valor faz parte da chave.
///
/// Mudar o formato do valor exige subir a versão; entradas antigas passam a
/// ser ignoradas.
pub struct Chave<T> {
    pub nome: &'static str,
    pub versao: u32,
    _tipo: PhantomData<fn() -> T>,
}

impl<T> Chave<T> {
    pub const fn new(nome: &'static str, versao: u32) -> Self {
        Self {
            nome,
            versao,
            _tipo: PhantomData,
        }
    }

    fn arquivo(&self) -> String {
        format!("{}.v{}.json", self.nome, self.versao)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Entrada<T> {
    versao: u32,
    gravado_em: DateTime<Utc>,
    valor: T,
}

/// Estado da listagem salvo para sobreviver à navegação de volta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SnapshotListagem {
    pub filtros: FiltrosImoveis,
    pub pagina: u32,
    pub imoveis: Vec<Imovel>,
}

pub const CHAVE_LISTAGEM_IMOVEIS: Chave<SnapshotListagem> = Chave::new("listagem-imoveis", 1);

pub struct CacheLocal {
    diretorio: PathBuf,
    ttl: Duration,
}

impl CacheLocal {
    pub fn new(diretorio: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            diretorio: diretorio.into(),
            ttl,
        }
    }

    /// TTL padrão de 30 minutos.
    pub fn com_ttl_padrao(diretorio: impl Into<PathBuf>) -> Self {
        Self::new(diretorio, Duration::minutes(30))
    }

    pub fn diretorio(&self) -> &Path {
        &self.diretorio
    }

    fn caminho<T>(&self, chave: &Chave<T>) -> PathBuf {
        self.diretorio.join(chave.arquivo())
    }

    pub fn gravar<T: Serialize>(&self, chave: &Chave<T>, valor: &T) -> Result<(), AppError> {
        self.gravar_em(chave, valor, Utc::now())
    }

    pub fn gravar_em<T: Serialize>(
        &self,
        chave: &Chave<T>,
        valor: &T,
        agora: DateTime<Utc>,
    ) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.diretorio)?;
        let entrada = Entrada {
            versao: chave.versao,
            gravado_em: agora,
            valor,
        };
        let json = serde_json::to_string(&entrada)?;

        // temporário + rename: leitores nunca veem um arquivo parcial
        let caminho = self.caminho(chave);
        let temporario = caminho.with_extension("json.tmp");
        std::fs::write(&temporario, json)?;
        std::fs::rename(&temporario, &caminho)?;
        debug!("Cache '{}' gravado", chave.nome);
        Ok(())
    }

    /// Grava ignorando erros; só registra no log.
    pub fn gravar_silencioso<T: Serialize>(&self, chave: &Chave<T>, valor: &T) {
        if let Err(e) = self.gravar(chave, valor) {
            warn!("Não foi possível gravar o cache '{}': {}", chave.nome, e);
        }
    }

    pub fn ler<T: DeserializeOwned>(&self, chave: &Chave<T>) -> Option<T> {
        self.ler_em(chave, Utc::now())
    }

    /// Lê a entrada se ainda estiver válida em `agora`.
    ///
    /// Entradas expiradas, de outra versão ou ilegíveis são removidas.
    pub fn ler_em<T: DeserializeOwned>(&self, chave: &Chave<T>, agora: DateTime<Utc>) -> Option<T> {
        let caminho = self.caminho(chave);
        let conteudo = std::fs::read_to_string(&caminho).ok()?;

        let entrada: Entrada<T> = match serde_json::from_str(&conteudo) {
            Ok(entrada) => entrada,
            Err(e) => {
                warn!("Cache '{}' ilegível, descartando: {}", chave.nome, e);
                self.invalidar(chave);
                return None;
            }
        };

        if entrada.versao != chave.versao {
            debug!("Cache '{}' de outra versão ({})", chave.nome, entrada.versao);
            self.invalidar(chave);
            return None;
        }
        if agora - entrada.gravado_em > self.ttl {
            debug!("Cache '{}' expirado", chave.nome);
            self.invalidar(chave);
            return None;
        }

        Some(entrada.valor)
    }

    pub fn invalidar<T>(&self, chave: &Chave<T>) {
        let caminho = self.caminho(chave);
        if caminho.exists() {
            if let Err(e) = std::fs::remove_file(&caminho) {
                warn!("Não foi possível remover {}: {}", caminho.display(), e);
            }
        }
    }
}
