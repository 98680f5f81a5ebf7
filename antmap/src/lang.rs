//! Localized user-facing messages.
//!
//! Every string the console prints goes through [`Messages::tr`]. Three
//! built-in tables are shipped (English, Portuguese, Turkish); a JSON file
//! can override individual entries:
//!
//! ```json
//! {
//!     "MENU_TITLE": "== ANTENNAS ==",
//!     "SUCCESS_LOAD": "Map ready\n"
//! }
//! ```
//!
//! Keys missing from the file keep the built-in text, so a partial
//! translation never leaves the menu without a message.

use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Portuguese.
    Pt,
    /// Turkish.
    Tr,
}

/// Identifier of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    MenuTitle,
    MenuOptions,
    PromptChoice,
    PromptVertexIndex,
    PromptSourceIndex,
    PromptDestIndex,
    PromptFrequency,
    PromptFrequencyA,
    PromptFrequencyB,
    PromptCoordinates,
    PromptFilename,
    PromptFileChoice,
    PromptOverwrite,
    AvailableFiles,
    AntennasHeader,
    EdgesHeader,
    EffectsHeader,
    PathsFound,
    DangerPoints,
    DangerOverlaps,
    Intersections,
    SuccessLoad,
    SuccessSave,
    SuccessInsert,
    SuccessRemove,
    ListsCleared,
    NotOverwritten,
    Quit,
    ErrIo,
    ErrNoFileLoaded,
    ErrNoFiles,
    ErrInvalidChoice,
    ErrInvalidInput,
    ErrNoPaths,
    ErrNothingFound,
    ErrIntersectionsNotFound,
}

impl MessageId {
    pub const ALL: [MessageId; 36] = [
        MessageId::MenuTitle,
        MessageId::MenuOptions,
        MessageId::PromptChoice,
        MessageId::PromptVertexIndex,
        MessageId::PromptSourceIndex,
        MessageId::PromptDestIndex,
        MessageId::PromptFrequency,
        MessageId::PromptFrequencyA,
        MessageId::PromptFrequencyB,
        MessageId::PromptCoordinates,
        MessageId::PromptFilename,
        MessageId::PromptFileChoice,
        MessageId::PromptOverwrite,
        MessageId::AvailableFiles,
        MessageId::AntennasHeader,
        MessageId::EdgesHeader,
        MessageId::EffectsHeader,
        MessageId::PathsFound,
        MessageId::DangerPoints,
        MessageId::DangerOverlaps,
        MessageId::Intersections,
        MessageId::SuccessLoad,
        MessageId::SuccessSave,
        MessageId::SuccessInsert,
        MessageId::SuccessRemove,
        MessageId::ListsCleared,
        MessageId::NotOverwritten,
        MessageId::Quit,
        MessageId::ErrIo,
        MessageId::ErrNoFileLoaded,
        MessageId::ErrNoFiles,
        MessageId::ErrInvalidChoice,
        MessageId::ErrInvalidInput,
        MessageId::ErrNoPaths,
        MessageId::ErrNothingFound,
        MessageId::ErrIntersectionsNotFound,
    ];

    /// Key used in override files.
    pub fn key(&self) -> &'static str {
        match self {
            MessageId::MenuTitle => "MENU_TITLE",
            MessageId::MenuOptions => "MENU_OPTIONS",
            MessageId::PromptChoice => "PROMPT_CHOICE",
            MessageId::PromptVertexIndex => "PROMPT_VERTEX_INDEX",
            MessageId::PromptSourceIndex => "PROMPT_SOURCE_INDEX",
            MessageId::PromptDestIndex => "PROMPT_DEST_INDEX",
            MessageId::PromptFrequency => "PROMPT_FREQUENCY",
            MessageId::PromptFrequencyA => "PROMPT_FREQUENCY_A",
            MessageId::PromptFrequencyB => "PROMPT_FREQUENCY_B",
            MessageId::PromptCoordinates => "PROMPT_COORDINATES",
            MessageId::PromptFilename => "PROMPT_FILENAME",
            MessageId::PromptFileChoice => "PROMPT_FILE_CHOICE",
            MessageId::PromptOverwrite => "PROMPT_OVERWRITE",
            MessageId::AvailableFiles => "AVAILABLE_FILES",
            MessageId::AntennasHeader => "ANTENNAS_HEADER",
            MessageId::EdgesHeader => "EDGES_HEADER",
            MessageId::EffectsHeader => "EFFECTS_HEADER",
            MessageId::PathsFound => "PATHS_FOUND",
            MessageId::DangerPoints => "DANGER_POINTS",
            MessageId::DangerOverlaps => "DANGER_OVERLAPS",
            MessageId::Intersections => "INTERSECTIONS",
            MessageId::SuccessLoad => "SUCCESS_LOAD",
            MessageId::SuccessSave => "SUCCESS_SAVE",
            MessageId::SuccessInsert => "SUCCESS_INSERT",
            MessageId::SuccessRemove => "SUCCESS_REMOVE",
            MessageId::ListsCleared => "LISTS_CLEARED",
            MessageId::NotOverwritten => "NOT_OVERWRITTEN",
            MessageId::Quit => "SUCCESS_QUIT",
            MessageId::ErrIo => "ERR_IO",
            MessageId::ErrNoFileLoaded => "ERR_FILE_NOT_LOADED",
            MessageId::ErrNoFiles => "ERR_NO_FILES",
            MessageId::ErrInvalidChoice => "ERR_INVALID_CHOICE",
            MessageId::ErrInvalidInput => "ERR_INVALID_INPUT",
            MessageId::ErrNoPaths => "ERR_NO_PATHS",
            MessageId::ErrNothingFound => "ERR_NOTHING_FOUND",
            MessageId::ErrIntersectionsNotFound => "ERR_INTERSECTIONS_NOT_FOUND",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.key() == key)
    }
}

/// Message lookup for the active language.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    lang: Language,
    overrides: HashMap<MessageId, String>,
}

impl Messages {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            overrides: HashMap::new(),
        }
    }

    /// Loads overrides from a JSON object file on top of the built-in table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object
    /// of strings.
    pub fn with_overrides(lang: Language, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid message file {}", path.display()))?;

        let mut messages = Self::new(lang);
        for (key, text) in entries {
            match MessageId::from_key(&key) {
                Some(id) => {
                    messages.overrides.insert(id, text);
                }
                None => warn!("unknown message key {key:?} in {}", path.display()),
            }
        }
        debug!(
            "{} message overrides loaded from {}",
            messages.overrides.len(),
            path.display()
        );
        Ok(messages)
    }

    /// Translates a message id. Never fails.
    pub fn tr(&self, id: MessageId) -> &str {
        match self.overrides.get(&id) {
            Some(text) => text,
            None => builtin(self.lang, id),
        }
    }
}

fn builtin(lang: Language, id: MessageId) -> &'static str {
    match lang {
        Language::En => english(id),
        Language::Pt => portuguese(id),
        Language::Tr => turkish(id),
    }
}

fn english(id: MessageId) -> &'static str {
    use MessageId::*;
    match id {
        MenuTitle => "\n============================\n         MAIN MENU\n============================",
        MenuOptions => "\
1. Load matrix
2. Depth-First Search (DFS)
3. Breadth-First Search (BFS)
4. All Paths
5. Frequency Intersections
6. Danger Point Intersections
7. Insert antenna
8. Remove antenna
9. Print antennas
10. Print edges
11. Print danger points
12. Clear lists
13. Save matrix
14. Effect positions
15. Save antennas (table)
16. Save effect positions (table)
17. Save effect positions (dot map)
0. Exit",
        PromptChoice => "Enter your choice: ",
        PromptVertexIndex => "Enter vertex index",
        PromptSourceIndex => "Enter source index",
        PromptDestIndex => "Enter destination index",
        PromptFrequency => "Frequency: ",
        PromptFrequencyA => "Enter frequency A: ",
        PromptFrequencyB => "Enter frequency B: ",
        PromptCoordinates => "Coordinates (row col): ",
        PromptFilename => "Enter file name: ",
        PromptFileChoice => "Select a file by number: ",
        PromptOverwrite => "File already exists. Overwrite it? (y/n): ",
        AvailableFiles => "Available files",
        AntennasHeader => "Antennas",
        EdgesHeader => "Edges",
        EffectsHeader => "Effect positions",
        PathsFound => "All paths found",
        DangerPoints => "Danger points for frequency",
        DangerOverlaps => "Danger overlaps for frequencies",
        Intersections => "Intersections for frequencies",
        SuccessLoad => "Matrix loaded successfully",
        SuccessSave => "Saved successfully",
        SuccessInsert => "Antenna inserted",
        SuccessRemove => "Antenna removed",
        ListsCleared => "Lists cleared successfully.",
        NotOverwritten => "File not overwritten.",
        Quit => "Good-bye!",
        ErrIo => "I/O error - cannot open file",
        ErrNoFileLoaded => "Error - no file loaded",
        ErrNoFiles => "No files found in the input directory",
        ErrInvalidChoice => "Invalid choice, try again",
        ErrInvalidInput => "Invalid input",
        ErrNoPaths => "No paths found.",
        ErrNothingFound => "Nothing found.",
        ErrIntersectionsNotFound => "Intersections not found.",
    }
}

fn portuguese(id: MessageId) -> &'static str {
    use MessageId::*;
    match id {
        MenuTitle => "\n============================\n       MENU PRINCIPAL\n============================",
        MenuOptions => "\
1. Carregar matriz
2. Busca em profundidade (DFS)
3. Busca em largura (BFS)
4. Todos os caminhos
5. Interseccao de frequencias
6. Interseccao de pontos perigosos
7. Inserir antena
8. Remover antena
9. Imprimir antenas
10. Imprimir arestas
11. Imprimir pontos perigosos
12. Limpar listas
13. Salvar matriz
14. Posicoes de efeito
15. Salvar antenas (tabela)
16. Salvar posicoes de efeito (tabela)
17. Salvar posicoes de efeito (mapa)
0. Sair",
        PromptChoice => "Escolha uma opcao: ",
        PromptVertexIndex => "Indice do vertice",
        PromptSourceIndex => "Indice de origem",
        PromptDestIndex => "Indice de destino",
        PromptFrequency => "Frequencia: ",
        PromptFrequencyA => "Frequencia A: ",
        PromptFrequencyB => "Frequencia B: ",
        PromptCoordinates => "Coordenadas (linha coluna): ",
        PromptFilename => "Nome do ficheiro: ",
        PromptFileChoice => "Escolha um ficheiro pelo numero: ",
        PromptOverwrite => "O ficheiro ja existe. Substituir? (y/n): ",
        AvailableFiles => "Ficheiros disponiveis",
        AntennasHeader => "Antenas",
        EdgesHeader => "Arestas",
        EffectsHeader => "Posicoes de efeito",
        PathsFound => "Todos os caminhos encontrados",
        DangerPoints => "Pontos perigosos para a frequencia",
        DangerOverlaps => "Interseccao de pontos perigosos para as frequencias",
        Intersections => "Interseccoes para as frequencias",
        SuccessLoad => "Matriz carregada com sucesso",
        SuccessSave => "Guardado com sucesso",
        SuccessInsert => "Antena inserida",
        SuccessRemove => "Antena removida",
        ListsCleared => "Listas limpas com sucesso.",
        NotOverwritten => "Ficheiro nao substituido.",
        Quit => "Adeus!",
        ErrIo => "Erro E/S - nao foi possivel abrir o ficheiro",
        ErrNoFileLoaded => "Erro - ficheiro nao carregado",
        ErrNoFiles => "Nenhum ficheiro encontrado na pasta de entrada",
        ErrInvalidChoice => "Opcao invalida, tente novamente",
        ErrInvalidInput => "Entrada invalida",
        ErrNoPaths => "Nenhum caminho encontrado.",
        ErrNothingFound => "Nada encontrado.",
        ErrIntersectionsNotFound => "Interseccao nao encontrada.",
    }
}

fn turkish(id: MessageId) -> &'static str {
    use MessageId::*;
    match id {
        MenuTitle => "\n============================\n          ANA MENU\n============================",
        MenuOptions => "\
1. Matris yukle
2. Derinlik Oncelikli Arama (DFS)
3. Genislik Oncelikli Arama (BFS)
4. Tum Rotalar
5. Frekans Kesismeleri
6. Tehlikeli Nokta Kesismeleri
7. Anten ekle
8. Anten cikar
9. Antenleri yazdir
10. Kenarlari yazdir
11. Tehlikeli noktalari yazdir
12. Listeleri temizle
13. Matrisi kaydet
14. Etki konumlari
15. Antenleri kaydet (tablo)
16. Etki konumlarini kaydet (tablo)
17. Etki konumlarini kaydet (harita)
0. Cikis",
        PromptChoice => "Seciminizi giriniz: ",
        PromptVertexIndex => "Dugum indeksi giriniz",
        PromptSourceIndex => "Kaynak indeksi giriniz",
        PromptDestIndex => "Hedef indeksi giriniz",
        PromptFrequency => "Frekans: ",
        PromptFrequencyA => "Frekans A giriniz: ",
        PromptFrequencyB => "Frekans B giriniz: ",
        PromptCoordinates => "Koordinatlar (satir sutun): ",
        PromptFilename => "Dosya adi giriniz: ",
        PromptFileChoice => "Dosya numarasini seciniz: ",
        PromptOverwrite => "Dosya zaten var. Uzerine yazilsin mi? (y/n): ",
        AvailableFiles => "Bulunan dosyalar",
        AntennasHeader => "Antenler",
        EdgesHeader => "Kenarlar",
        EffectsHeader => "Etki konumlari",
        PathsFound => "Bulunan tum yollar",
        DangerPoints => "Frekansi icin tehlike noktalari",
        DangerOverlaps => "Frekanslar icin tehlike kesisimleri",
        Intersections => "Frekanslar icin kesisimler",
        SuccessLoad => "Matris basariyla yuklendi!",
        SuccessSave => "Basariyla kaydedildi!",
        SuccessInsert => "Anten eklendi",
        SuccessRemove => "Anten cikarildi",
        ListsCleared => "Listeler basariyla temizlendi.",
        NotOverwritten => "Dosyanin uzerine yazilmadi.",
        Quit => "Hosca kal!",
        ErrIo => "G/C hatasi - dosya acilamadi!",
        ErrNoFileLoaded => "Hata - dosya yuklu degil.",
        ErrNoFiles => "Giris klasorunde dosya bulunamadi",
        ErrInvalidChoice => "Gecersiz secim, tekrar deneyiniz.",
        ErrInvalidInput => "Gecersiz giris",
        ErrNoPaths => "Yol bulunamadi.",
        ErrNothingFound => "Hicbir sey bulunamadi.",
        ErrIntersectionsNotFound => "Kesisim bulunamadi.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for id in MessageId::ALL {
            assert_eq!(MessageId::from_key(id.key()), Some(id));
        }
        assert_eq!(MessageId::from_key("NO_SUCH_KEY"), None);
    }

    #[test]
    fn test_every_language_has_every_message() {
        for lang in [Language::En, Language::Pt, Language::Tr] {
            let messages = Messages::new(lang);
            for id in MessageId::ALL {
                assert!(!messages.tr(id).is_empty(), "{lang:?} {id:?}");
            }
        }
    }

    #[test]
    fn test_overrides_fall_back_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages_xx.json");
        fs::write(
            &path,
            r#"{ "SUCCESS_QUIT": "Tchau!", "NOT_A_KEY": "ignored" }"#,
        )
        .unwrap();

        let messages = Messages::with_overrides(Language::Pt, &path).unwrap();
        assert_eq!(messages.tr(MessageId::Quit), "Tchau!");
        assert_eq!(
            messages.tr(MessageId::ErrNoPaths),
            "Nenhum caminho encontrado."
        );
    }

    #[test]
    fn test_bad_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(Messages::with_overrides(Language::En, &path).is_err());
        assert!(Messages::with_overrides(Language::En, dir.path().join("none.json")).is_err());
    }
}
