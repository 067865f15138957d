//! Fixed code lists used by the request form and the approval dialog.

use serde::{Deserialize, Serialize};

/// Marca que el director puede aprobar para el cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Marca {
    #[serde(rename = "SV")]
    Svan,
    #[serde(rename = "WD")]
    Wonder,
    #[serde(rename = "AS")]
    Aspes,
    #[serde(rename = "HY")]
    Hyundai,
}

impl Marca {
    pub const ALL: [Marca; 4] = [Marca::Svan, Marca::Wonder, Marca::Aspes, Marca::Hyundai];

    pub fn code(&self) -> &'static str {
        match self {
            Marca::Svan => "SV",
            Marca::Wonder => "WD",
            Marca::Aspes => "AS",
            Marca::Hyundai => "HY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Marca::Svan => "SVAN (SV)",
            Marca::Wonder => "Wonder (WD)",
            Marca::Aspes => "Aspes (AS)",
            Marca::Hyundai => "Hyundai (HY)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tarifa {
    #[serde(rename = "XEGC")]
    Xegc,
    #[serde(rename = "DZLM")]
    Dzlm,
    #[serde(rename = "AFDZLM")]
    Afdzlm,
    #[serde(rename = "WJPI")]
    Wjpi,
    #[serde(rename = "GDGDZLM")]
    Gdgdzlm,
}

impl Tarifa {
    pub const ALL: [Tarifa; 5] = [
        Tarifa::Xegc,
        Tarifa::Dzlm,
        Tarifa::Afdzlm,
        Tarifa::Wjpi,
        Tarifa::Gdgdzlm,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Tarifa::Xegc => "XEGC",
            Tarifa::Dzlm => "DZLM",
            Tarifa::Afdzlm => "AFDZLM",
            Tarifa::Wjpi => "WJPI",
            Tarifa::Gdgdzlm => "GDGDZLM",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// Término de pago asignado por administración.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminoPago {
    #[serde(rename = "10D")]
    Dias10,
    #[serde(rename = "14D")]
    Dias14,
    #[serde(rename = "15-30")]
    Dias15a30,
    #[serde(rename = "15D")]
    Dias15,
    #[serde(rename = "21D")]
    Dias21,
    #[serde(rename = "30-60")]
    Dias30a60,
    #[serde(rename = "30D")]
    Dias30,
    #[serde(rename = "45D")]
    Dias45,
    #[serde(rename = "60D")]
    Dias60,
    #[serde(rename = "75D")]
    Dias75,
    #[serde(rename = "90D")]
    Dias90,
    #[serde(rename = "PREPAGO")]
    Prepago,
    #[serde(rename = "DESCAR+30D")]
    Descarga30,
}

impl TerminoPago {
    pub const ALL: [TerminoPago; 13] = [
        TerminoPago::Dias10,
        TerminoPago::Dias14,
        TerminoPago::Dias15a30,
        TerminoPago::Dias15,
        TerminoPago::Dias21,
        TerminoPago::Dias30a60,
        TerminoPago::Dias30,
        TerminoPago::Dias45,
        TerminoPago::Dias60,
        TerminoPago::Dias75,
        TerminoPago::Dias90,
        TerminoPago::Prepago,
        TerminoPago::Descarga30,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TerminoPago::Dias10 => "10D",
            TerminoPago::Dias14 => "14D",
            TerminoPago::Dias15a30 => "15-30",
            TerminoPago::Dias15 => "15D",
            TerminoPago::Dias21 => "21D",
            TerminoPago::Dias30a60 => "30-60",
            TerminoPago::Dias30 => "30D",
            TerminoPago::Dias45 => "45D",
            TerminoPago::Dias60 => "60D",
            TerminoPago::Dias75 => "75D",
            TerminoPago::Dias90 => "90D",
            TerminoPago::Prepago => "PREPAGO",
            TerminoPago::Descarga30 => "DESCAR+30D",
        }
    }

    pub fn label(&self) -> String {
        match self {
            TerminoPago::Prepago | TerminoPago::Descarga30 => self.code().to_string(),
            _ => format!("{} DÍAS", self.code().trim_end_matches('D')),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetodoPago {
    #[serde(rename = "TRANSFERENCIA")]
    Transferencia,
    #[serde(rename = "RECIBO")]
    Recibo,
    #[serde(rename = "RECIBO B2B")]
    ReciboB2b,
    #[serde(rename = "CONF. CLIENTE")]
    ConfCliente,
    #[serde(rename = "CRÉDITO")]
    Credito,
}

impl MetodoPago {
    pub const ALL: [MetodoPago; 5] = [
        MetodoPago::Transferencia,
        MetodoPago::Recibo,
        MetodoPago::ReciboB2b,
        MetodoPago::ConfCliente,
        MetodoPago::Credito,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MetodoPago::Transferencia => "TRANSFERENCIA",
            MetodoPago::Recibo => "RECIBO",
            MetodoPago::ReciboB2b => "RECIBO B2B",
            MetodoPago::ConfCliente => "CONF. CLIENTE",
            MetodoPago::Credito => "CRÉDITO",
        }
    }

    /// Direct-debit methods need a signed SEPA mandate on file.
    pub fn requires_sepa(&self) -> bool {
        matches!(self, MetodoPago::Recibo | MetodoPago::ReciboB2b)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoCarga {
    #[serde(rename = "COMP")]
    Completa,
    #[serde(rename = "CROSS")]
    Cross,
    #[serde(rename = "GRUP")]
    Grupaje,
    #[serde(rename = "TTPRO")]
    Ttpro,
}

impl TipoCarga {
    pub const ALL: [TipoCarga; 4] = [
        TipoCarga::Completa,
        TipoCarga::Cross,
        TipoCarga::Grupaje,
        TipoCarga::Ttpro,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TipoCarga::Completa => "COMP",
            TipoCarga::Cross => "CROSS",
            TipoCarga::Grupaje => "GRUP",
            TipoCarga::Ttpro => "TTPRO",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}
