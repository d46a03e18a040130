// 画像XObject構築、ページツリー組立、バイト列出力

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::error::Result;
use crate::page::{IMAGE_RESOURCE, PageFragment};

/// ページフラグメントを順に受け取り、単一のPDFドキュメントへ組み立てる。
///
/// Pages ノードのIDは生成時に予約し、各ページのParent参照に使う。
/// ページツリー本体・Catalog・trailerは[`finish`](Self::finish)で確定する。
pub struct ImagePageWriter {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl ImagePageWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// 画像XObjectを追加する。
    ///
    /// 戻り値はXObjectのオブジェクトID。ピクセルはzlib圧縮済みなので
    /// FilterはFlateDecode固定。
    fn add_image_xobject(&mut self, zlib_data: Vec<u8>, width: u32, height: u32) -> ObjectId {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        };
        let stream = Stream::new(dict, zlib_data);
        self.doc.add_object(Object::Stream(stream))
    }

    /// 1ページ追加する。呼び出し順がそのままページ順になる。
    pub fn append_page(&mut self, fragment: PageFragment) {
        let image_id =
            self.add_image_xobject(fragment.image_data, fragment.width, fragment.height);

        let mut xobject_dict = lopdf::Dictionary::new();
        xobject_dict.set(IMAGE_RESOURCE, Object::Reference(image_id));
        let resources_id = self.doc.add_object(dictionary! {
            "XObject" => Object::Dictionary(xobject_dict),
        });

        let content_stream = Stream::new(dictionary! {}, fragment.content_ops);
        let content_id = self.doc.add_object(Object::Stream(content_stream));

        // ページサイズは画像と同寸（1px = 1pt）
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(fragment.width as i64),
                Object::Integer(fragment.height as i64),
            ],
            "Resources" => resources_id,
            "Contents" => content_id,
        });

        self.kids.push(page_id.into());
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// ページツリーとCatalogを確定し、PDFバイト列を出力する。
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| crate::error::PdfBindError::pdf_write(e.to_string()))?;
        Ok(buf)
    }
}

impl Default for ImagePageWriter {
    fn default() -> Self {
        Self::new()
    }
}
